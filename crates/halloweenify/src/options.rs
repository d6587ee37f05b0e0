//! Caller-facing configuration.
//!
//! [`Options`] mirrors the JavaScript options object field for field: every
//! field has a default such that an empty object produces the canonical
//! theme whenever the date window matches. Field names serialize in
//! camelCase so a plain JS object deserializes directly.

use serde::{Deserialize, Deserializer, Serialize};

/// Anchor position for the overlay logo (and the drag-hint bubble tied
/// to it).
///
/// Deserialization is lenient: any string that is not one of the five
/// kebab-case names means [`LogoPosition::Center`]. A typo in one field
/// must not throw away the rest of the caller's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    /// Centered via a translate transform.
    #[default]
    Center,
    /// Pinned to the top-left corner.
    TopLeft,
    /// Pinned to the top-right corner.
    TopRight,
    /// Pinned to the bottom-left corner.
    BottomLeft,
    /// Pinned to the bottom-right corner.
    BottomRight,
}

impl<'de> Deserialize<'de> for LogoPosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

impl LogoPosition {
    /// Maps a kebab-case name to its anchor; anything else is `Center`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            _ => Self::Center,
        }
    }
    /// Whether the anchor sits on the right edge.
    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Whether the anchor sits on the bottom edge.
    #[must_use]
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }
}

/// Theme configuration, immutable once handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Apply regardless of the date window and URL flag. Does not override
    /// the user's disable record.
    pub force: bool,
    /// Window start as `"MM-DD"`; malformed values are ignored.
    pub start_date: Option<String>,
    /// Window end as `"MM-DD"`; malformed values are ignored.
    pub end_date: Option<String>,
    /// Tiling background texture; supplying one switches to the dark palette.
    pub background_texture_path: Option<String>,
    /// Source of the draggable overlay logo; no logo without it.
    pub overlay_logo_path: Option<String>,
    /// Replacement favicon; the original is backed up and restored.
    pub favicon_path: Option<String>,
    /// Opacity of the corner spider webs, clamped to `[0, 1]` at use.
    pub spider_opacity: f64,
    /// Where the logo (and its hint bubble) anchors.
    pub logo_position: LogoPosition,
    /// Corner spider-web overlays.
    pub enable_webs: bool,
    /// Pumpkin emoji cursor.
    pub enable_cursor: bool,
    /// Overlay logo (still requires `overlay_logo_path`).
    pub enable_logo: bool,
    /// Pumpkin prefix on the page title.
    pub enable_title_emoji: bool,
    /// Themed scrollbar skin.
    pub enable_scrollbar: bool,
    /// Styled greeting in the browser console.
    pub enable_console_message: bool,
    /// Floating ghost marker over hyperlinks.
    pub enable_ghost_links: bool,
    /// Display-font override for headings.
    pub enable_font: bool,
    /// Favicon swap (still requires `favicon_path`).
    pub enable_favicon: bool,
    /// User-facing disable button.
    pub enable_user_toggle: bool,
    /// Transient "double-click to drag" bubble next to the logo.
    pub show_drag_hint: bool,
    /// Expose the restoration function on the window object.
    pub expose_cleanup: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            force: false,
            start_date: None,
            end_date: None,
            background_texture_path: None,
            overlay_logo_path: None,
            favicon_path: None,
            spider_opacity: 0.2,
            logo_position: LogoPosition::Center,
            enable_webs: true,
            enable_cursor: true,
            enable_logo: true,
            enable_title_emoji: true,
            enable_scrollbar: true,
            enable_console_message: true,
            enable_ghost_links: true,
            enable_font: true,
            enable_favicon: true,
            enable_user_toggle: true,
            show_drag_hint: true,
            expose_cleanup: false,
        }
    }
}

impl Options {
    /// Spider opacity clamped to the renderable range.
    #[must_use]
    pub fn clamped_spider_opacity(&self) -> f64 {
        self.spider_opacity.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_the_canonical_theme() {
        let options = Options::default();
        assert!(!options.force);
        assert!(options.enable_webs);
        assert!(options.enable_cursor);
        assert!(options.enable_logo);
        assert!(options.enable_title_emoji);
        assert!(options.enable_scrollbar);
        assert!(options.enable_console_message);
        assert!(options.enable_ghost_links);
        assert!(options.enable_font);
        assert!(options.enable_favicon);
        assert!(options.enable_user_toggle);
        assert!(options.show_drag_hint);
        assert!(!options.expose_cleanup);
        assert_eq!(options.logo_position, LogoPosition::Center);
        assert!((options.spider_opacity - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let options: Options = serde_json::from_str("{}").expect("empty object");
        assert!(options.enable_ghost_links);
        assert!(options.overlay_logo_path.is_none());
    }

    #[test]
    fn partial_object_merges_over_defaults() {
        let options: Options = serde_json::from_str(
            r#"{"force": true, "logoPosition": "top-right", "enableWebs": false}"#,
        )
        .expect("partial object");
        assert!(options.force);
        assert!(!options.enable_webs);
        assert!(options.enable_cursor);
        assert_eq!(options.logo_position, LogoPosition::TopRight);
    }

    #[test]
    fn logo_position_round_trips_kebab_case() {
        for (position, text) in [
            (LogoPosition::Center, "\"center\""),
            (LogoPosition::TopLeft, "\"top-left\""),
            (LogoPosition::TopRight, "\"top-right\""),
            (LogoPosition::BottomLeft, "\"bottom-left\""),
            (LogoPosition::BottomRight, "\"bottom-right\""),
        ] {
            assert_eq!(serde_json::to_string(&position).expect("serialize"), text);
            let back: LogoPosition = serde_json::from_str(text).expect("deserialize");
            assert_eq!(back, position);
        }
    }

    #[test]
    fn unknown_logo_position_keeps_the_other_options() {
        let options: Options =
            serde_json::from_str(r#"{"force": true, "logoPosition": "middle"}"#)
                .expect("lenient position");
        assert!(options.force);
        assert_eq!(options.logo_position, LogoPosition::Center);
    }

    #[test]
    fn logo_position_names_fall_back_to_center() {
        assert_eq!(LogoPosition::from_name("top-right"), LogoPosition::TopRight);
        assert_eq!(LogoPosition::from_name("center"), LogoPosition::Center);
        assert_eq!(LogoPosition::from_name("TOP-LEFT"), LogoPosition::Center);
        assert_eq!(LogoPosition::from_name(""), LogoPosition::Center);
    }

    #[test]
    fn spider_opacity_is_clamped_at_use() {
        let mut options = Options::default();
        options.spider_opacity = 7.5;
        assert!((options.clamped_spider_opacity() - 1.0).abs() < f64::EPSILON);
        options.spider_opacity = -3.0;
        assert!(options.clamped_spider_opacity().abs() < f64::EPSILON);
    }

    #[test]
    fn anchor_edge_helpers() {
        assert!(LogoPosition::TopRight.is_right());
        assert!(LogoPosition::BottomRight.is_right());
        assert!(!LogoPosition::Center.is_right());
        assert!(LogoPosition::BottomLeft.is_bottom());
        assert!(!LogoPosition::TopLeft.is_bottom());
    }
}
