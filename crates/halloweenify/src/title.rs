//! Title marker.
//!
//! Prepends the pumpkin glyph to the page title, capturing the original
//! string once so restoration is exact. A second restore is a no-op.

use crate::dom::Dom;
use crate::session::Session;

const TITLE_MARKER: &str = "🎃";

/// Prefixes the title with the marker, capturing the original first.
pub(crate) fn apply(dom: &mut impl Dom, session: &mut Session) {
    let current = dom.title();
    if session.original_title.is_none() {
        session.original_title = Some(current.clone());
    }
    if !current.starts_with(TITLE_MARKER) {
        if let Some(original) = &session.original_title {
            dom.set_title(&format!("{TITLE_MARKER} {original}"));
        }
    }
}

/// Puts the captured title back and clears the capture.
pub(crate) fn restore(dom: &mut impl Dom, session: &mut Session) {
    if let Some(original) = session.original_title.take() {
        dom.set_title(&original);
    }
}
