//! The orchestrator.
//!
//! [`Engine`] owns the three capabilities (document, store, clock) and the
//! per-activation [`Session`], runs the activation gate, fans out to the
//! injectors, and routes adapter events (pointer, timer, frame) into the
//! right controller. The adapter layer (`web-sys` in the browser, the
//! in-memory page in tests) stays free of any decision logic.

use tracing::{debug, info};

use crate::artifacts;
use crate::clock::Clock;
use crate::css;
use crate::dom::{Dom, ListenerKind, TimerKind};
use crate::gate;
use crate::ids::{ACTIVE_BODY_CLASS, STYLE_ID, THEME_COLOR_META_ID};
use crate::logo::DragPhase;
use crate::options::Options;
use crate::session::Session;
use crate::store::{self, KeyValueStore};
use crate::{favicon, ghost, logo, title, toggle};

const BANNER_TEXT: &str = "%c🎃 Happy Halloween from halloweenify! 🎃";
const BANNER_CSS: &str =
    "color: #FFA500; background: #181818; font-size: 1.2em; padding: 4px; border-radius: 4px; font-weight: bold;";

/// The activation/injection/restoration engine.
///
/// One instance lives per page load. All public methods are infallible:
/// error conditions degrade internally and are logged.
#[derive(Debug)]
pub struct Engine<D, S, C> {
    dom: D,
    store: S,
    clock: C,
    session: Session,
}

impl<D: Dom, S: KeyValueStore, C: Clock> Engine<D, S, C> {
    /// Creates an engine over the given capabilities.
    pub fn new(dom: D, store: S, clock: C) -> Self {
        Self {
            dom,
            store,
            clock,
            session: Session::default(),
        }
    }

    /// Applies the theme if the activation gate allows it. Defers to
    /// page-ready when the document is still parsing. Calling this twice
    /// produces no duplicate artifacts.
    pub fn apply(&mut self, options: Options) {
        if !self.dom.has_document() {
            debug!("no document in this context, skipping");
            return;
        }
        if !gate::should_activate(&options, &self.dom, &mut self.store, &self.clock) {
            return;
        }
        if self.dom.is_loading() {
            debug!("document still loading, deferring activation");
            self.session.pending = Some(options);
            self.dom.install_listener(ListenerKind::DomReady);
            return;
        }
        self.run(&options);
    }

    /// Page finished parsing: run a deferred activation, if any.
    pub fn on_dom_ready(&mut self) {
        self.dom.remove_listener(ListenerKind::DomReady);
        if let Some(options) = self.session.pending.take() {
            self.run(&options);
        }
    }

    fn run(&mut self, options: &Options) {
        info!("activating theme");
        if options.enable_console_message {
            self.dom.console_banner(BANNER_TEXT, BANNER_CSS);
        }

        self.dom.add_body_class(ACTIVE_BODY_CLASS);
        self.inject_theme(options);

        if options.enable_logo {
            if let Some(src) = &options.overlay_logo_path {
                logo::inject(&mut self.dom, &mut self.session, src, options.show_drag_hint);
            }
        }
        if options.enable_favicon {
            if let Some(href) = &options.favicon_path {
                favicon::inject(&mut self.dom, href);
            }
        }
        if options.enable_title_emoji {
            title::apply(&mut self.dom, &mut self.session);
        }
        if options.enable_ghost_links {
            ghost::setup(&mut self.dom, &mut self.session);
        }
        if options.enable_user_toggle {
            toggle::inject(&mut self.dom);
        }
        if options.expose_cleanup {
            self.dom.expose_cleanup_hook();
        }
    }

    /// Injects the stylesheet and its `theme-color` meta tag once. Both
    /// are keyed to the stylesheet's presence, so a re-apply with other
    /// options cannot leave the meta color describing a palette the
    /// injected stylesheet does not use.
    fn inject_theme(&mut self, options: &Options) {
        if self.dom.element_exists(STYLE_ID) {
            return;
        }
        let sheet = css::compose(options);

        self.dom.create_element("style", STYLE_ID);
        self.dom.set_attr(STYLE_ID, "type", "text/css");
        self.dom.set_text(STYLE_ID, &sheet.css);
        self.dom.append_to_head(STYLE_ID);

        if !self.dom.element_exists(THEME_COLOR_META_ID) {
            self.dom.create_element("meta", THEME_COLOR_META_ID);
            self.dom.set_attr(THEME_COLOR_META_ID, "name", "theme-color");
            self.dom.append_to_head(THEME_COLOR_META_ID);
        }
        self.dom
            .set_attr(THEME_COLOR_META_ID, "content", &sheet.theme_color);
    }

    /// Full restoration: reverses every injected artifact, restores the
    /// title and favicon, and clears the session. Safe to call at any
    /// time, including with nothing injected.
    pub fn remove(&mut self) {
        artifacts::restore_all(&mut self.dom, &mut self.session);
    }

    /// The disable button was activated: restore, then suppress
    /// re-activation for the rest of the local day.
    pub fn on_toggle_click(&mut self) {
        self.remove();
        store::disable_for_today(&mut self.store, &self.clock);
    }

    /// Double-click on the logo.
    pub fn on_logo_dblclick(&mut self) {
        logo::on_dblclick(&mut self.dom, &mut self.session);
    }

    /// Pointer pressed on the logo at viewport coordinates `(x, y)`.
    pub fn on_logo_pointer_down(&mut self, x: f64, y: f64) {
        logo::on_pointer_down(&mut self.dom, &mut self.session, x, y);
    }

    /// Document-level pointer move during a drag.
    pub fn on_drag_move(&mut self, x: f64, y: f64) {
        logo::on_drag_move(&mut self.dom, &mut self.session, x, y);
    }

    /// Document-level pointer release.
    pub fn on_drag_end(&mut self) {
        logo::on_drag_end(&mut self.dom, &mut self.session);
    }

    /// Animation frame callback.
    pub fn on_frame(&mut self) {
        logo::on_frame(&mut self.dom, &mut self.session);
    }

    /// Document-level pointer move for the ghost marker. `over_link` is
    /// the adapter's `closest('a')` hit test result.
    pub fn on_ghost_move(&mut self, x: f64, y: f64, over_link: bool) {
        ghost::on_move(&mut self.dom, &self.session, x, y, over_link);
    }

    /// Pointer-leave at the document boundary; `left_window` is true when
    /// the related target was empty.
    pub fn on_ghost_leave(&mut self, left_window: bool) {
        ghost::on_leave(&mut self.dom, &self.session, left_window);
    }

    /// One of the engine's timers fired.
    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::HintFade => logo::on_hint_fade_elapsed(&mut self.dom, &mut self.session),
            TimerKind::HintRemove => {
                logo::on_hint_remove_elapsed(&mut self.dom, &mut self.session);
            }
        }
    }

    /// Current drag phase, for adapters that want to skip work while idle.
    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.session.drag.phase
    }

    /// Shared access to the document capability.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Exclusive access to the document capability.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Shared access to the key/value store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
