//! # halloweenify-wasm
//!
//! The halloweenify engine compiled to WebAssembly, with a
//! JavaScript-facing API matching the classic drop-in script.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { halloweenify, removeHalloweenify } from 'halloweenify-wasm';
//!
//! async function main() {
//!     await init();
//!
//!     halloweenify({
//!         overlayLogoPath: '/assets/witch.png',
//!         faviconPath: '/assets/pumpkin.ico',
//!         logoPosition: 'bottom-right',
//!     });
//! }
//!
//! main();
//! ```
//!
//! Activation is gated exactly like the engine documents it: the date
//! window (October 31 by default), the `?spooky=true` URL flag, the
//! `force` option, and the user's own disable record, which wins.
//!
//! ## Available APIs
//!
//! - `halloweenify(options?)` - Apply the theme if the gate allows it
//! - `removeHalloweenify()` - Restore the page completely
//! - `version()` - Crate version
//! - `isReady()` - Module liveness probe

#![forbid(unsafe_code)]

mod dom;
mod storage;

use std::cell::RefCell;

use halloweenify::{Engine, Options, SystemClock};
use wasm_bindgen::prelude::*;

pub use dom::WebDom;
pub use storage::LocalStorage;

type WebEngine = Engine<WebDom, LocalStorage, SystemClock>;

thread_local! {
    static ENGINE: RefCell<Option<WebEngine>> = const { RefCell::new(None) };
}

fn with_engine<R>(f: impl FnOnce(&mut WebEngine) -> R) -> R {
    ENGINE.with(|slot| {
        let mut slot = slot.borrow_mut();
        let engine = slot.get_or_insert_with(|| {
            Engine::new(WebDom::new(), LocalStorage::new(), SystemClock)
        });
        engine.dom_mut().drain_retired();
        f(engine)
    })
}

/// Initialize the halloweenify WASM module.
///
/// This sets up the panic hook for better error messages in the browser
/// console. Called automatically on module load.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Apply the Halloween theme if the activation gate allows it.
///
/// `options` is a plain object mirroring the engine's `Options` (camelCase
/// keys); omitted fields keep their defaults. `undefined`, `null` and
/// unparsable objects all fall back to the default configuration.
#[wasm_bindgen(js_name = "halloweenify")]
pub fn halloweenify(options: JsValue) {
    let options = parse_options(&options);
    with_engine(|engine| engine.apply(options));
}

/// Restore the page to its pre-theme state. Safe to call at any time.
#[wasm_bindgen(js_name = "removeHalloweenify")]
pub fn remove_halloweenify() {
    with_engine(Engine::remove);
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if the module is properly initialized.
#[must_use]
#[wasm_bindgen(js_name = "isReady")]
#[allow(clippy::missing_const_for_fn)] // wasm_bindgen doesn't support const fn
pub fn is_ready() -> bool {
    true
}

fn parse_options(raw: &JsValue) -> Options {
    if raw.is_undefined() || raw.is_null() {
        return Options::default();
    }
    let Ok(json) = js_sys::JSON::stringify(raw) else {
        warn_bad_options();
        return Options::default();
    };
    let Some(json) = json.as_string() else {
        warn_bad_options();
        return Options::default();
    };
    match serde_json::from_str(&json) {
        Ok(options) => options,
        Err(_) => {
            warn_bad_options();
            Options::default()
        }
    }
}

fn warn_bad_options() {
    web_sys::console::warn_1(&JsValue::from_str(
        "halloweenify: could not understand the options object, using defaults",
    ));
}

/// Event routing from the adapter's closures back into the engine.
///
/// Every dispatch starts by draining closures retired during earlier
/// dispatches; see the adapter module for why they cannot be dropped
/// eagerly.
pub(crate) mod dispatch {
    use halloweenify::{ListenerKind, TimerId, TimerKind};
    use wasm_bindgen::JsCast;
    use web_sys::{Event, MouseEvent};

    use super::with_engine;

    fn mouse_coords(event: &Event) -> Option<(f64, f64)> {
        let mouse = event.dyn_ref::<MouseEvent>()?;
        Some((f64::from(mouse.client_x()), f64::from(mouse.client_y())))
    }

    fn over_link(event: &Event) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("a").ok().flatten())
            .is_some()
    }

    pub(crate) fn event(kind: ListenerKind, event: &Event) {
        match kind {
            ListenerKind::DomReady => with_engine(super::Engine::on_dom_ready),
            ListenerKind::DragMove => {
                if let Some((x, y)) = mouse_coords(event) {
                    event.prevent_default();
                    with_engine(|engine| engine.on_drag_move(x, y));
                }
            }
            ListenerKind::DragUp => with_engine(super::Engine::on_drag_end),
            ListenerKind::GhostMove => {
                if let Some((x, y)) = mouse_coords(event) {
                    let hit = over_link(event);
                    with_engine(|engine| engine.on_ghost_move(x, y, hit));
                }
            }
            ListenerKind::GhostLeave => {
                let left_window = event
                    .dyn_ref::<MouseEvent>()
                    .is_some_and(|mouse| mouse.related_target().is_none());
                with_engine(|engine| engine.on_ghost_leave(left_window));
            }
            ListenerKind::LogoDblClick => {
                event.prevent_default();
                with_engine(super::Engine::on_logo_dblclick);
            }
            ListenerKind::LogoPointerDown => {
                if let Some((x, y)) = mouse_coords(event) {
                    // Stops the browser's native image drag.
                    event.prevent_default();
                    with_engine(|engine| engine.on_logo_pointer_down(x, y));
                }
            }
            ListenerKind::ToggleClick => with_engine(super::Engine::on_toggle_click),
        }
    }

    pub(crate) fn timer_fired(kind: TimerKind, id: TimerId) {
        with_engine(|engine| {
            // Hold the fired closure until this dispatch returns.
            let _guard = engine.dom_mut().take_timer(id);
            engine.on_timer(kind);
        });
    }

    pub(crate) fn frame() {
        with_engine(super::Engine::on_frame);
    }

    pub(crate) fn cleanup_invoked() {
        with_engine(super::Engine::remove);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }
}
