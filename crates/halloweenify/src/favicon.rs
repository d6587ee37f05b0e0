//! Favicon swap with exact restoration.
//!
//! On first injection the current icon link (or its explicit absence) is
//! captured into a hidden backup placeholder in the head, so restoration
//! can put back exactly what was there, byte for byte, or nothing at all.

use crate::dom::{Dom, IconLink};
use crate::ids::ORIGINAL_FAVICON_ID;

const BACKUP_MARKER: &str = "data-halloweenify-original";

/// Swaps the live favicon for `href`, backing up the original first.
pub(crate) fn inject(dom: &mut impl Dom, href: &str) {
    if !dom.element_exists(ORIGINAL_FAVICON_ID) {
        match dom.active_icon_link() {
            Some(original) => {
                // Clone the original link into a hidden placeholder.
                dom.create_element("link", ORIGINAL_FAVICON_ID);
                dom.set_attr(ORIGINAL_FAVICON_ID, "rel", &original.rel);
                dom.set_attr(ORIGINAL_FAVICON_ID, "type", &original.icon_type);
                dom.set_attr(ORIGINAL_FAVICON_ID, "href", &original.href);
                dom.set_attr(ORIGINAL_FAVICON_ID, BACKUP_MARKER, "true");
                dom.set_style(ORIGINAL_FAVICON_ID, "display", "none");
                dom.append_to_head(ORIGINAL_FAVICON_ID);
            }
            None => {
                // Record explicitly that the page had no icon.
                dom.create_element("meta", ORIGINAL_FAVICON_ID);
                dom.set_attr(ORIGINAL_FAVICON_ID, BACKUP_MARKER, "true");
                dom.append_to_head(ORIGINAL_FAVICON_ID);
            }
        }
    }

    dom.set_active_icon_link(&IconLink {
        rel: "shortcut icon".to_owned(),
        icon_type: "image/x-icon".to_owned(),
        href: href.to_owned(),
    });
}

/// Restores the pre-injection favicon state and drops the backup.
///
/// Without a backup placeholder nothing was ever injected, so the host
/// page's own icon is left untouched.
pub(crate) fn restore(dom: &mut impl Dom) {
    if !dom.element_exists(ORIGINAL_FAVICON_ID) {
        return;
    }
    dom.remove_active_icon_link();
    if dom.tag_name(ORIGINAL_FAVICON_ID).as_deref() == Some("link") {
        let rel = dom
            .attr(ORIGINAL_FAVICON_ID, "rel")
            .unwrap_or_else(|| "shortcut icon".to_owned());
        let icon_type = dom
            .attr(ORIGINAL_FAVICON_ID, "type")
            .unwrap_or_else(|| "image/x-icon".to_owned());
        let href = dom.attr(ORIGINAL_FAVICON_ID, "href").unwrap_or_default();
        dom.set_active_icon_link(&IconLink {
            rel,
            icon_type,
            href,
        });
    }
    dom.remove_element(ORIGINAL_FAVICON_ID);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn original_icon() -> IconLink {
        IconLink {
            rel: "icon".to_owned(),
            icon_type: "image/png".to_owned(),
            href: "https://example.test/original.png".to_owned(),
        }
    }

    #[test]
    fn swap_and_restore_round_trips_exactly() {
        let mut dom = MemoryDom::new();
        dom.seed_icon(original_icon());

        inject(&mut dom, "/spooky.ico");
        let swapped = dom.active_icon_link().expect("icon present");
        assert_eq!(swapped.href, "/spooky.ico");
        assert!(dom.element_exists(ORIGINAL_FAVICON_ID));

        restore(&mut dom);
        assert_eq!(dom.active_icon_link(), Some(original_icon()));
        assert!(!dom.element_exists(ORIGINAL_FAVICON_ID));
    }

    #[test]
    fn page_without_icon_ends_without_icon() {
        let mut dom = MemoryDom::new();

        inject(&mut dom, "/spooky.ico");
        assert!(dom.active_icon_link().is_some());
        assert_eq!(dom.tag_name(ORIGINAL_FAVICON_ID).as_deref(), Some("meta"));

        restore(&mut dom);
        assert_eq!(dom.active_icon_link(), None);
        assert!(!dom.element_exists(ORIGINAL_FAVICON_ID));
    }

    #[test]
    fn repeat_injection_keeps_one_backup() {
        let mut dom = MemoryDom::new();
        dom.seed_icon(original_icon());

        inject(&mut dom, "/first.ico");
        inject(&mut dom, "/second.ico");
        // The backup still describes the true original, not /first.ico.
        assert_eq!(
            dom.attr(ORIGINAL_FAVICON_ID, "href").as_deref(),
            Some("https://example.test/original.png")
        );

        restore(&mut dom);
        assert_eq!(dom.active_icon_link(), Some(original_icon()));
    }

    #[test]
    fn restore_without_injection_leaves_host_icon_alone() {
        let mut dom = MemoryDom::new();
        dom.seed_icon(original_icon());
        restore(&mut dom);
        assert_eq!(dom.active_icon_link(), Some(original_icon()));
    }
}
