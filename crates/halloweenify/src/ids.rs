//! Fixed identifiers for every artifact the engine owns.
//!
//! Each injected node carries one of these ids, and the injectors use them as
//! idempotence guards: an element that already exists by id is never created
//! a second time. Restoration removes artifacts by the same ids, so the two
//! sides can never drift apart.

/// Id of the injected stylesheet element.
pub const STYLE_ID: &str = "spooky-style";

/// Id of the draggable overlay logo image.
pub const LOGO_ID: &str = "spooky-overlay-logo";

/// Id of the floating ghost-link marker.
pub const GHOST_LINK_ID: &str = "spooky-ghost-link";

/// Name of the global cleanup hook exposed on the window object.
pub const CLEANUP_FN: &str = "__halloweenify_remove";

/// Id of the hidden backup placeholder holding the original favicon.
pub const ORIGINAL_FAVICON_ID: &str = "spooky-original-favicon";

/// Storage key for the "disabled until" timestamp.
pub const USER_DISABLE_KEY: &str = "halloweenify_disabled_until";

/// Id of the user-facing disable button.
pub const TOGGLE_BUTTON_ID: &str = "spooky-toggle-button";

/// Id of the transient drag-hint bubble.
pub const HINT_BUBBLE_ID: &str = "spooky-hint-bubble";

/// Id of the `theme-color` meta tag for mobile browser chrome.
pub const THEME_COLOR_META_ID: &str = "spooky-theme-color";

/// Class toggled on the body while the theme is active.
pub const ACTIVE_BODY_CLASS: &str = "halloweenify-active";

/// Delay before the drag hint starts fading, in milliseconds.
pub const HINT_FADE_MS: u32 = 5000;

/// Duration of the hint fade transition before the bubble is detached.
pub const HINT_REMOVE_MS: u32 = 700;
