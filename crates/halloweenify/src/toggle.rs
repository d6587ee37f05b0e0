//! User-facing disable button.
//!
//! A single fixed-position button; activating it triggers full restoration
//! and then writes the disable-until record, so re-activation attempts for
//! the rest of the day are suppressed. The click handling itself lives on
//! the engine so both effects run against the same session.

use crate::dom::{Dom, ListenerKind};
use crate::ids::TOGGLE_BUTTON_ID;

/// Injects the toggle button; a no-op when it already exists.
pub(crate) fn inject(dom: &mut impl Dom) {
    if !dom.body_ready() || dom.element_exists(TOGGLE_BUTTON_ID) {
        return;
    }
    dom.create_element("button", TOGGLE_BUTTON_ID);
    dom.set_text(TOGGLE_BUTTON_ID, "🎃 Désactiver");
    dom.set_attr(
        TOGGLE_BUTTON_ID,
        "aria-label",
        "Disable Halloween theme for today",
    );
    dom.append_to_body(TOGGLE_BUTTON_ID);
    dom.install_listener(ListenerKind::ToggleClick);
}
