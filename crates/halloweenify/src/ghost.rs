//! Ghost-link marker.
//!
//! One floating glyph, driven by two document-level delegated listeners
//! instead of per-link handlers, so dynamically added links just work. The
//! adapter performs the `closest('a')` hit test and hands the engine a
//! boolean.

use crate::dom::{Dom, ListenerKind};
use crate::ids::GHOST_LINK_ID;
use crate::session::Session;

/// Creates the marker and installs the delegated listeners. Idempotent
/// via the live-instance flag.
pub(crate) fn setup(dom: &mut impl Dom, session: &mut Session) {
    if session.ghost_live || !dom.body_ready() {
        return;
    }
    dom.create_element("div", GHOST_LINK_ID);
    dom.set_text(GHOST_LINK_ID, "👻");
    dom.append_to_body(GHOST_LINK_ID);
    dom.install_listener(ListenerKind::GhostMove);
    dom.install_listener(ListenerKind::GhostLeave);
    session.ghost_live = true;
}

/// Pointer moved: show the marker at the pointer while over a hyperlink,
/// hide it otherwise.
pub(crate) fn on_move(
    dom: &mut impl Dom,
    session: &Session,
    x: f64,
    y: f64,
    over_link: bool,
) {
    if !session.ghost_live {
        return;
    }
    if over_link {
        dom.set_style(GHOST_LINK_ID, "left", &format!("{x}px"));
        dom.set_style(GHOST_LINK_ID, "top", &format!("{y}px"));
        dom.add_class(GHOST_LINK_ID, "visible");
    } else {
        dom.remove_class(GHOST_LINK_ID, "visible");
    }
}

/// Pointer left the viewport: force the marker hidden.
pub(crate) fn on_leave(dom: &mut impl Dom, session: &Session, left_window: bool) {
    if session.ghost_live && left_window {
        dom.remove_class(GHOST_LINK_ID, "visible");
    }
}

/// Removes the listeners and the marker and clears the live flag.
pub(crate) fn teardown(dom: &mut impl Dom, session: &mut Session) {
    if !session.ghost_live {
        // The element may still need sweeping if the flag was lost.
        dom.remove_element(GHOST_LINK_ID);
        return;
    }
    dom.remove_listener(ListenerKind::GhostMove);
    dom.remove_listener(ListenerKind::GhostLeave);
    dom.remove_element(GHOST_LINK_ID);
    session.ghost_live = false;
}
