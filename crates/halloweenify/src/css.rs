//! Stylesheet composition.
//!
//! Builds the single injected stylesheet as a concatenation of
//! independently togglable fragments, plus the `theme-color` value for the
//! companion meta tag. Two palettes exist: the light "Pumpkin Spice"
//! palette used by default, and the dark "Midnight Pumpkin" palette that
//! takes over when a background texture is supplied.
//!
//! Everything here is pure string construction; injection happens in the
//! engine.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::ids::{
    ACTIVE_BODY_CLASS, GHOST_LINK_ID, HINT_BUBBLE_ID, LOGO_ID, TOGGLE_BUTTON_ID,
};
use crate::options::{LogoPosition, Options};

/// Semantic color slots referenced by the generated CSS variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Page background (also the `theme-color` meta value).
    pub bg: String,
    /// Body text.
    pub text: String,
    /// Headings, and the accent used for borders.
    pub heading: String,
    /// Hyperlinks.
    pub link: String,
    /// Scrollbar track.
    pub scrollbar_track: String,
    /// Toggle button background.
    pub toggle_bg: String,
    /// Toggle button text.
    pub toggle_text: String,
    /// Toggle button background on hover.
    pub toggle_hover_bg: String,
    /// Toggle button text on hover.
    pub toggle_hover_text: String,
    /// Hint bubble background.
    pub hint_bg: String,
    /// Hint bubble text.
    pub hint_text: String,
}

impl Palette {
    /// The light palette ("Pumpkin Spice").
    #[must_use]
    pub fn light() -> Self {
        Self {
            bg: "#FAF8F1".to_owned(),
            text: "#222222".to_owned(),
            heading: "#D95B00".to_owned(),
            link: "#5D3A9B".to_owned(),
            scrollbar_track: "#e0ddd5".to_owned(),
            toggle_bg: "#D95B00".to_owned(),
            toggle_text: "#FFFFFF".to_owned(),
            toggle_hover_bg: "#FFA500".to_owned(),
            toggle_hover_text: "#000000".to_owned(),
            hint_bg: "#333333".to_owned(),
            hint_text: "#FFFFFF".to_owned(),
        }
    }

    /// The dark palette ("Midnight Pumpkin"), used with a background
    /// texture.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            bg: "#181818".to_owned(),
            text: "#E0E0E0".to_owned(),
            heading: "#FFA500".to_owned(),
            link: "#C490FF".to_owned(),
            scrollbar_track: "#222222".to_owned(),
            toggle_bg: "#FFA500".to_owned(),
            toggle_text: "#000000".to_owned(),
            toggle_hover_bg: "#FFC500".to_owned(),
            toggle_hover_text: "#000000".to_owned(),
            hint_bg: "#E0E0E0".to_owned(),
            hint_text: "#181818".to_owned(),
        }
    }

    /// The palette selected by the given options.
    #[must_use]
    pub fn for_options(options: &Options) -> Self {
        if options.background_texture_path.is_some() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    fn root_block(&self) -> String {
        format!(
            ":root {{\n  --spooky-bg: {bg};\n  --spooky-text: {text};\n  --spooky-heading: {heading};\n  --spooky-link: {link};\n  --spooky-scrollbar-track: {track};\n  --spooky-scrollbar-thumb: var(--spooky-heading);\n  --spooky-scrollbar-border: var(--spooky-bg);\n  --spooky-toggle-bg: {toggle_bg};\n  --spooky-toggle-text: {toggle_text};\n  --spooky-toggle-hover-bg: {toggle_hover_bg};\n  --spooky-toggle-hover-text: {toggle_hover_text};\n  --spooky-hint-bg: {hint_bg};\n  --spooky-hint-text: {hint_text};\n  --spooky-hint-border: var(--spooky-heading);\n  --spooky-logo-border: var(--spooky-heading);\n}}\n",
            bg = self.bg,
            text = self.text,
            heading = self.heading,
            link = self.link,
            track = self.scrollbar_track,
            toggle_bg = self.toggle_bg,
            toggle_text = self.toggle_text,
            toggle_hover_bg = self.toggle_hover_bg,
            toggle_hover_text = self.toggle_hover_text,
            hint_bg = self.hint_bg,
            hint_text = self.hint_text,
        )
    }
}

/// The composed stylesheet plus the meta-tag color it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// Full CSS text for the injected style element.
    pub css: String,
    /// Background color for the `theme-color` meta tag.
    pub theme_color: String,
}

/// Percent-encodes a string the way `encodeURIComponent` does: everything
/// escaped except ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// Inline SVG spider web as a data URI.
#[must_use]
pub fn spider_web_data_uri() -> String {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><g stroke='%23888' stroke-width='.5' fill='none'><circle cx='50' cy='50' r='36'/><path d='M50 14V86M14 50H86M26 24L74 76M74 24L26 76'/><circle cx='50' cy='50' r='4' stroke='%23777' stroke-width='.6'/></g></svg>";
    format!("data:image/svg+xml;utf8,{}", percent_encode(svg))
}

/// An emoji rendered as an SVG cursor data URI.
#[must_use]
pub fn emoji_cursor_data_uri(emoji: &str, size: u32) -> String {
    let text_y = (f64::from(size) * 0.8).round() as u32;
    let font_size = (f64::from(size) * 0.9).round() as u32;
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{size}' height='{size}' viewport='0 0 {size} {size}'><text x='0' y='{text_y}' font-size='{font_size}px'>{emoji}</text></svg>"
    );
    format!("data:image/svg+xml;utf8,{}", percent_encode(&svg))
}

fn base_styles(palette: &Palette, texture: Option<&str>) -> String {
    let mut css = palette.root_block();
    match texture {
        Some(texture) => {
            let _ = write!(
                css,
                "body.{cls} {{\n  background-color: var(--spooky-bg) !important;\n  background-image: url(\"{texture}\") !important;\n  background-repeat: repeat !important;\n  color: var(--spooky-text) !important;\n}}\n",
                cls = ACTIVE_BODY_CLASS,
            );
        }
        None => {
            let _ = write!(
                css,
                "body.{cls} {{\n  background-color: var(--spooky-bg) !important;\n  color: var(--spooky-text) !important;\n}}\n",
                cls = ACTIVE_BODY_CLASS,
            );
        }
    }
    let underline = if texture.is_some() {
        "underline dashed rgba(196, 144, 255, 0.25)"
    } else {
        "underline dotted rgba(0,0,0,0.3)"
    };
    let _ = write!(
        css,
        ".{cls} h1, .{cls} h2, .{cls} h3 {{\n  color: var(--spooky-heading) !important;\n}}\n.{cls} a {{\n  color: var(--spooky-link) !important;\n  text-decoration: {underline};\n}}\n",
        cls = ACTIVE_BODY_CLASS,
    );
    css
}

fn cursor_rule(enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    format!(
        "body.{cls} {{ cursor: url('{uri}') 0 0, auto !important; }}\n",
        cls = ACTIVE_BODY_CLASS,
        uri = emoji_cursor_data_uri("🎃", 32),
    )
}

fn font_styles(enabled: bool) -> String {
    if enabled {
        format!(
            "@import url('https://fonts.googleapis.com/css2?family=Creepster&display=swap');\n.{cls} h1, .{cls} h2, .{cls} h3 {{\n  font-family: 'Creepster', cursive !important;\n  letter-spacing: 0.5px;\n}}\n",
            cls = ACTIVE_BODY_CLASS,
        )
    } else {
        format!(
            ".{cls} h1, .{cls} h2, .{cls} h3 {{\n  color: var(--spooky-heading) !important;\n}}\n",
            cls = ACTIVE_BODY_CLASS,
        )
    }
}

fn webs_style(enabled: bool, opacity: f64) -> String {
    if !enabled {
        return String::new();
    }
    format!(
        "/* Corner spider webs */\nbody::before, body::after {{\n  content: ''; position: fixed; width: 300px; height: 300px;\n  background-image: url(\"{uri}\"); background-size: contain; background-repeat: no-repeat;\n  opacity: {opacity}; pointer-events: none; z-index: 9998;\n  filter: drop-shadow(0 2px 6px rgba(0,0,0,0.3)); transform: translateY(-8px);\n}}\nbody::before {{ top: 0px; left: 0px; transform: rotate(-8deg) translateY(-8px); }}\nbody::after  {{ top: 0px; right: 0px; transform: rotate(8deg) translateY(-8px); }}\n",
        uri = spider_web_data_uri(),
    )
}

fn scrollbar_style(enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    "/* Scrollbar */\n::-webkit-scrollbar { width: 12px; }\n::-webkit-scrollbar-track { background: var(--spooky-scrollbar-track); }\n::-webkit-scrollbar-thumb {\n  background-color: var(--spooky-scrollbar-thumb); border-radius: 6px;\n  border: 2px solid var(--spooky-scrollbar-border);\n}\n* { scrollbar-width: thin; scrollbar-color: var(--spooky-scrollbar-thumb) var(--spooky-scrollbar-track); }\n"
        .to_owned()
}

fn ghost_link_style(enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    format!(
        "/* Ghost link marker */\n#{id} {{\n  position: fixed; font-size: 20px; pointer-events: none; opacity: 0;\n  transition: opacity 0.2s ease-out, transform 0.2s ease-out; z-index: 10001;\n  transform: translate(-50%, -100%);\n}}\n#{id}.visible {{ opacity: 0.8; }}\n",
        id = GHOST_LINK_ID,
    )
}

fn header_footer_style() -> String {
    format!(
        "/* Header/footer overrides */\n.{cls} header, .{cls} footer {{\n  color: var(--spooky-text) !important;\n}}\n.{cls} header h1, .{cls} header h2, .{cls} header h3,\n.{cls} footer h1, .{cls} footer h2, .{cls} footer h3 {{\n  color: var(--spooky-heading) !important;\n}}\n.{cls} header a, .{cls} footer a {{\n  color: var(--spooky-link) !important;\n}}\n",
        cls = ACTIVE_BODY_CLASS,
    )
}

/// Per-anchor layout: the logo's position rule plus where the hint bubble
/// sits and which way its speech tail points.
struct AnchorLayout {
    logo_position: &'static str,
    hint_top: &'static str,
    hint_left: &'static str,
    hint_transform: &'static str,
}

fn anchor_layout(position: LogoPosition) -> AnchorLayout {
    match position {
        LogoPosition::TopLeft => AnchorLayout {
            logo_position: "top: 20px; left: 20px; transform: translate(0, 0);",
            hint_top: "20px",
            hint_left: "20px",
            hint_transform: "translate(160px, 0)",
        },
        LogoPosition::TopRight => AnchorLayout {
            logo_position: "top: 20px; right: 20px; left: auto; transform: translate(0, 0);",
            hint_top: "20px",
            hint_left: "auto",
            hint_transform: "translate(calc(-100% - 20px), 0)",
        },
        LogoPosition::BottomLeft => AnchorLayout {
            logo_position: "bottom: 20px; top: auto; left: 20px; transform: translate(0, 0);",
            hint_top: "auto",
            hint_left: "20px",
            hint_transform: "translate(160px, -100%)",
        },
        LogoPosition::BottomRight => AnchorLayout {
            logo_position:
                "bottom: 20px; top: auto; right: 20px; left: auto; transform: translate(0, 0);",
            hint_top: "auto",
            hint_left: "auto",
            hint_transform: "translate(calc(-100% - 20px), -100%)",
        },
        LogoPosition::Center => AnchorLayout {
            logo_position: "top: 50%; left: 50%; transform: translate(-50%, -50%);",
            hint_top: "50%",
            hint_left: "50%",
            hint_transform: "translate(calc(-50% + 220px), -120%)",
        },
    }
}

fn logo_block(position: LogoPosition) -> String {
    let layout = anchor_layout(position);
    format!(
        "#{id} {{\n  position: fixed; {pos}\n  width: 90%; max-width: 400px; max-height: 80vh; object-fit: contain;\n  z-index: 9997; pointer-events: auto !important; cursor: default; opacity: 0.9;\n  filter: drop-shadow(0 4px 15px rgba(0,0,0,0.3)); border: 2px dashed transparent;\n  transition: border-color 0.3s ease, left 0.1s linear, top 0.1s linear;\n}}\n#{id}.is-draggable {{ cursor: grab; border-color: var(--spooky-logo-border); }}\n#{id}.is-dragging {{ cursor: grabbing; opacity: 0.8; z-index: 10000; transition: border-color 0.3s ease; }}\n",
        id = LOGO_ID,
        pos = layout.logo_position,
    )
}

fn hint_bubble_style(enabled: bool, position: LogoPosition) -> String {
    if !enabled {
        return String::new();
    }
    let layout = anchor_layout(position);
    let right_pin = if position.is_right() { "right: 20px;\n  " } else { "" };
    let bottom_pin = if position.is_bottom() { "bottom: 20px;\n  " } else { "" };
    let tail_x = if position.is_right() { "right: -6px;" } else { "left: -6px;" };
    let tail_y = if position.is_bottom() { "bottom: 10px;" } else { "top: 10px;" };
    let tail_color = if position.is_right() {
        "transparent transparent transparent var(--spooky-hint-border)"
    } else {
        "transparent var(--spooky-hint-border) transparent transparent"
    };
    format!(
        "#{id} {{\n  position: fixed; top: {top}; left: {left};\n  {right_pin}{bottom_pin}transform: {transform}; background-color: var(--spooky-hint-bg);\n  color: var(--spooky-hint-text); padding: 8px 12px; border-radius: 5px;\n  font-size: 12px; font-family: sans-serif; border: 1px solid var(--spooky-hint-border);\n  box-shadow: 0 2px 5px rgba(0,0,0,0.2); z-index: 10000; opacity: 1;\n  transition: opacity 0.5s ease-out 0.2s; pointer-events: none;\n}}\n#{id}.fade-out {{ opacity: 0; }}\n#{id}::after {{\n  content: ''; position: absolute;\n  {tail_x}\n  {tail_y}\n  border-width: 6px; border-style: solid;\n  border-color: {tail_color};\n}}\n",
        id = HINT_BUBBLE_ID,
        top = layout.hint_top,
        left = layout.hint_left,
        transform = layout.hint_transform,
    )
}

fn toggle_button_style(enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    format!(
        "#{id} {{\n  position: fixed; bottom: 10px; left: 10px;\n  background: var(--spooky-toggle-bg); color: var(--spooky-toggle-text);\n  border: 1px solid rgba(128, 128, 128, 0.4); border-radius: 4px; padding: 2px 6px;\n  font-size: 10px; font-family: sans-serif; cursor: pointer; z-index: 10002;\n  text-decoration: none; opacity: 0.8;\n  transition: opacity 0.2s, background-color 0.2s, color 0.2s;\n}}\n#{id}:hover {{\n  opacity: 1; background: var(--spooky-toggle-hover-bg); color: var(--spooky-toggle-hover-text);\n}}\n",
        id = TOGGLE_BUTTON_ID,
    )
}

/// Composes the full stylesheet for the given options.
#[must_use]
pub fn compose(options: &Options) -> Stylesheet {
    let palette = Palette::for_options(options);
    let theme_color = palette.bg.clone();

    let mut css = String::from("/* halloweenify: theme */\n\n");
    css.push_str(&base_styles(
        &palette,
        options.background_texture_path.as_deref(),
    ));
    css.push('\n');
    css.push_str(&cursor_rule(options.enable_cursor));
    css.push('\n');
    css.push_str(&font_styles(options.enable_font));
    css.push_str(&scrollbar_style(options.enable_scrollbar));
    css.push_str(&webs_style(
        options.enable_webs,
        options.clamped_spider_opacity(),
    ));
    css.push_str(&ghost_link_style(options.enable_ghost_links));
    css.push_str(&header_footer_style());
    css.push('\n');
    css.push_str(&logo_block(options.logo_position));
    css.push('\n');
    css.push_str(&hint_bubble_style(
        options.show_drag_hint,
        options.logo_position,
    ));
    css.push_str(&toggle_button_style(options.enable_user_toggle));

    Stylesheet {
        css: css.trim_end().to_owned(),
        theme_color,
    }
}
