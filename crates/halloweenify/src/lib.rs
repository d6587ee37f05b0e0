#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::use_self)]

//! # Halloweenify
//!
//! A conditional seasonal overlay for web pages: palette and cursor
//! styling, corner spider webs, a draggable overlay logo, a floating
//! ghost marker over hyperlinks, a favicon and title swap, and a
//! user-facing disable toggle. Everything is injected once and exactly
//! reversible.
//!
//! The crate is split along a capability seam. Everything that decides
//! *what* to do (the activation gate, the date window, the stylesheet
//! composition, the drag state machine, the restoration bookkeeping)
//! lives here and talks to the page through the [`Dom`], [`KeyValueStore`]
//! and [`Clock`] traits. The `halloweenify-wasm` crate supplies the
//! `web-sys` adapters and the JavaScript-facing API; [`MemoryDom`] and
//! [`MemoryStore`] supply headless implementations for tests and other
//! hosts.
//!
//! ## Quick start (headless)
//!
//! ```rust
//! use halloweenify::{Dom, Engine, FixedClock, MemoryDom, MemoryStore, Options};
//!
//! let mut engine = Engine::new(
//!     MemoryDom::new(),
//!     MemoryStore::new(),
//!     FixedClock::halloween(),
//! );
//!
//! engine.apply(Options::default());
//! assert!(engine.dom().element_exists(halloweenify::ids::STYLE_ID));
//!
//! engine.remove();
//! assert!(!engine.dom().element_exists(halloweenify::ids::STYLE_ID));
//! ```
//!
//! ## Activation
//!
//! The theme activates when the current date falls inside the configured
//! window (October 31 by default), when the URL carries `spooky=true`, or
//! when [`Options::force`] is set, unless the user pressed the disable
//! toggle earlier today, which wins over everything.

pub mod artifacts;
pub mod clock;
pub mod css;
pub mod dom;
pub mod engine;
pub mod gate;
pub mod ids;
pub mod options;
pub mod session;
pub mod store;
pub mod window;

mod favicon;
mod ghost;
mod logo;
mod title;
mod toggle;

pub use artifacts::Artifact;
pub use clock::{Clock, FixedClock, SystemClock};
pub use css::{Palette, Stylesheet};
pub use dom::{Dom, IconLink, ListenerKind, MemoryDom, Rect, TimerId, TimerKind};
pub use engine::Engine;
pub use logo::{DragPhase, DragState};
pub use options::{LogoPosition, Options};
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use window::{DateWindow, MonthDay};
