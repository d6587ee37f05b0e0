//! Artifact inventory and exhaustive restoration.
//!
//! Restoration is one routine that undoes everything activation may have
//! done, in a fixed order that does not depend on what actually exists:
//! every step tolerates absence, so it is safe to call with nothing
//! injected, twice in a row, or mid-drag.

use tracing::debug;

use crate::dom::{Dom, ListenerKind};
use crate::ids::{
    ACTIVE_BODY_CLASS, GHOST_LINK_ID, HINT_BUBBLE_ID, LOGO_ID, ORIGINAL_FAVICON_ID, STYLE_ID,
    THEME_COLOR_META_ID, TOGGLE_BUTTON_ID,
};
use crate::session::Session;
use crate::{favicon, ghost, logo, title};

/// Every artifact kind the engine can own, with its fixed element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// The injected stylesheet.
    Stylesheet,
    /// The `theme-color` meta tag.
    ThemeColorMeta,
    /// The overlay logo image.
    Logo,
    /// The transient drag-hint bubble.
    HintBubble,
    /// The disable toggle button.
    ToggleButton,
    /// The ghost-link marker.
    GhostMarker,
    /// The hidden favicon backup placeholder.
    FaviconBackup,
}

impl Artifact {
    /// All artifact kinds that are plain elements.
    pub const ALL: [Self; 7] = [
        Self::Stylesheet,
        Self::ThemeColorMeta,
        Self::Logo,
        Self::HintBubble,
        Self::ToggleButton,
        Self::GhostMarker,
        Self::FaviconBackup,
    ];

    /// The fixed element id for this artifact.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Stylesheet => STYLE_ID,
            Self::ThemeColorMeta => THEME_COLOR_META_ID,
            Self::Logo => LOGO_ID,
            Self::HintBubble => HINT_BUBBLE_ID,
            Self::ToggleButton => TOGGLE_BUTTON_ID,
            Self::GhostMarker => GHOST_LINK_ID,
            Self::FaviconBackup => ORIGINAL_FAVICON_ID,
        }
    }
}

/// Reverses every effect of activation. Never errors, no matter how
/// little (or how much) is currently injected.
pub(crate) fn restore_all(dom: &mut impl Dom, session: &mut Session) {
    if !dom.has_document() {
        return;
    }
    debug!("restoring page state");

    dom.remove_body_class(ACTIVE_BODY_CLASS);
    dom.remove_element(STYLE_ID);
    dom.remove_element(THEME_COLOR_META_ID);

    // Logo, toggle and their element-level listeners.
    dom.remove_listener(ListenerKind::LogoDblClick);
    dom.remove_listener(ListenerKind::LogoPointerDown);
    dom.remove_element(LOGO_ID);
    dom.remove_listener(ListenerKind::ToggleClick);
    dom.remove_element(TOGGLE_BUTTON_ID);

    // Hint bubble and its pending timers.
    logo::dismiss_hint(dom, session);

    // A drag may be in flight; tear its listeners down regardless.
    dom.remove_listener(ListenerKind::DragMove);
    dom.remove_listener(ListenerKind::DragUp);

    ghost::teardown(dom, session);
    favicon::restore(dom);
    title::restore(dom, session);

    // A deferred activation must not fire after restoration.
    dom.remove_listener(ListenerKind::DomReady);
    session.pending = None;
    session.reset_transients();

    dom.remove_cleanup_hook();
}
