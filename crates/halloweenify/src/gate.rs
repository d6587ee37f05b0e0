//! Activation gate.
//!
//! Decides whether the theme runs at all. The user's disable record wins
//! over everything, including `force`; otherwise activation needs `force`,
//! the `spooky=true` URL flag, or a date-window match.

use tracing::debug;

use crate::clock::Clock;
use crate::dom::Dom;
use crate::options::Options;
use crate::store::{self, KeyValueStore};
use crate::window::DateWindow;

/// Returns whether the page URL carries `spooky=true` exactly.
///
/// Any failure to read the location degrades to `false`.
#[must_use]
pub fn url_has_spooky_flag(dom: &impl Dom) -> bool {
    let Some(query) = dom.query_string() else {
        return false;
    };
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "spooky=true")
}

/// Full activation decision.
pub fn should_activate(
    options: &Options,
    dom: &impl Dom,
    store: &mut impl KeyValueStore,
    clock: &impl Clock,
) -> bool {
    if store::is_disabled(store, clock) {
        debug!("theme disabled by user for today");
        return false;
    }

    if options.force {
        debug!("activation forced by options");
        return true;
    }
    if url_has_spooky_flag(dom) {
        debug!("activation forced by URL flag");
        return true;
    }

    let window = DateWindow::from_bounds(options.start_date.as_deref(), options.end_date.as_deref());
    let (month, day) = clock.today();
    let inside = window.contains(month, day);
    debug!(month, day, inside, "date window evaluated");
    inside
}
