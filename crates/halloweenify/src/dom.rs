//! Document capability.
//!
//! Every page mutation the engine performs goes through the [`Dom`] trait:
//! element creation and removal, classes and inline styles, the title and
//! favicon, document-level listeners, timers, animation frames, and the
//! global cleanup hook. The engine itself never touches a real document,
//! which keeps the whole state machine testable without a browser.
//!
//! Two implementations exist: [`MemoryDom`] in this module (an in-memory
//! page model with a manual timer/frame pump, used by every core test) and
//! the `web-sys` adapter in the `halloweenify-wasm` crate.

use std::collections::{BTreeMap, BTreeSet};

/// A listener slot the engine may ask the adapter to install.
///
/// Installation is keyed by kind, never by callback: the adapter owns the
/// actual handlers and routes events back into the engine. Installing a
/// kind twice is the engine's bug to avoid; removing an absent kind must
/// be tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// `DOMContentLoaded`, used to defer activation on a loading page.
    DomReady,
    /// Document-level pointer move while a drag is in progress.
    DragMove,
    /// Document-level pointer release ending a drag. Registered to fire at
    /// most once.
    DragUp,
    /// Document-level pointer move driving the ghost-link marker.
    GhostMove,
    /// Pointer leaving the viewport, hiding the ghost-link marker.
    GhostLeave,
    /// Double-click on the overlay logo (arms/disarms dragging).
    LogoDblClick,
    /// Pointer down on the overlay logo (begins a drag while armed).
    LogoPointerDown,
    /// Activation of the disable toggle button.
    ToggleClick,
}

/// A timer slot owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// Starts the hint bubble's fade transition.
    HintFade,
    /// Detaches the hint bubble after the fade transition has played.
    HintRemove,
}

/// Opaque handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// The attributes of a favicon link that matter for backup and restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLink {
    /// `rel` attribute, e.g. `"shortcut icon"`.
    pub rel: String,
    /// `type` attribute, e.g. `"image/x-icon"`.
    pub icon_type: String,
    /// `href` attribute.
    pub href: String,
}

/// Position of an element's box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Distance from the viewport's left edge, in pixels.
    pub left: f64,
    /// Distance from the viewport's top edge, in pixels.
    pub top: f64,
}

/// Capability interface over the host page.
///
/// All operations are best-effort: acting on a missing element is a no-op,
/// never an error. Ids are the engine's fixed artifact ids; host-page
/// elements without ids are only reachable through the dedicated favicon
/// operations.
pub trait Dom {
    /// Whether a document exists at all (false in non-browser contexts).
    fn has_document(&self) -> bool;

    /// Whether the document is still parsing (`readyState == "loading"`).
    fn is_loading(&self) -> bool;

    /// Whether the body element is available.
    fn body_ready(&self) -> bool;

    /// The location's raw query string, `None` without a browsing context.
    fn query_string(&self) -> Option<String>;

    /// Creates a detached element with the given tag and id.
    fn create_element(&mut self, tag: &str, id: &str);

    /// Whether an element with this id is attached.
    fn element_exists(&self, id: &str) -> bool;

    /// Lowercase tag name of the element, if it exists.
    fn tag_name(&self, id: &str) -> Option<String>;

    /// Removes the element; absent elements are ignored.
    fn remove_element(&mut self, id: &str);

    /// Sets an attribute on the element.
    fn set_attr(&mut self, id: &str, name: &str, value: &str);

    /// Reads an attribute from the element.
    fn attr(&self, id: &str, name: &str) -> Option<String>;

    /// Replaces the element's text content.
    fn set_text(&mut self, id: &str, text: &str);

    /// Appends the element to the document head.
    fn append_to_head(&mut self, id: &str);

    /// Appends the element to the document body.
    fn append_to_body(&mut self, id: &str);

    /// Adds a class to the element.
    fn add_class(&mut self, id: &str, class: &str);

    /// Removes a class from the element.
    fn remove_class(&mut self, id: &str, class: &str);

    /// Whether the element carries the class.
    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Sets an inline style property on the element.
    fn set_style(&mut self, id: &str, prop: &str, value: &str);

    /// Reads an inline style property from the element.
    fn style(&self, id: &str, prop: &str) -> Option<String>;

    /// The element's current bounding box, if it exists.
    fn bounding_rect(&self, id: &str) -> Option<Rect>;

    /// Adds a class to the body.
    fn add_body_class(&mut self, class: &str);

    /// Removes a class from the body.
    fn remove_body_class(&mut self, class: &str);

    /// Whether the body carries the class.
    fn body_has_class(&self, class: &str) -> bool;

    /// Current document title.
    fn title(&self) -> String;

    /// Replaces the document title.
    fn set_title(&mut self, title: &str);

    /// The live (non-backup) favicon link, if any.
    fn active_icon_link(&self) -> Option<IconLink>;

    /// Points the live favicon at `icon`, creating the link element when
    /// none exists. An existing link keeps its `rel`; only `type` and
    /// `href` are overwritten, matching how browsers pick icons up.
    fn set_active_icon_link(&mut self, icon: &IconLink);

    /// Removes the live (non-backup) favicon link, if any.
    fn remove_active_icon_link(&mut self);

    /// Installs the handler for a listener slot.
    fn install_listener(&mut self, kind: ListenerKind);

    /// Removes the handler for a listener slot; absent slots are ignored.
    fn remove_listener(&mut self, kind: ListenerKind);

    /// Whether the slot currently has a handler installed.
    fn listener_installed(&self, kind: ListenerKind) -> bool;

    /// Schedules a one-shot timer.
    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId;

    /// Cancels a pending timer; unknown ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Requests one animation-frame callback. The engine's coalescing
    /// latch guarantees at most one outstanding request.
    fn request_frame(&mut self);

    /// Exposes the restoration function under the fixed global name.
    fn expose_cleanup_hook(&mut self);

    /// Removes the global restoration hook; failure to delete falls back
    /// to overwriting it with an empty value.
    fn remove_cleanup_hook(&mut self);

    /// Prints the styled greeting to the console.
    fn console_banner(&mut self, text: &str, css: &str);
}

/// Where an element is attached in the in-memory page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Detached,
    Head,
    Body,
}

#[derive(Debug, Clone)]
struct MemoryElement {
    tag: String,
    text: String,
    attrs: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    slot: Slot,
    rect: Rect,
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            text: String::new(),
            attrs: BTreeMap::new(),
            classes: BTreeSet::new(),
            styles: BTreeMap::new(),
            slot: Slot::Detached,
            rect: Rect::default(),
        }
    }
}

/// In-memory page model.
///
/// Beyond the [`Dom`] contract it records everything a test wants to
/// assert on: every inline-style write, pending timers with a manual
/// firing pump, outstanding frame requests, and console banners.
#[derive(Debug, Default)]
pub struct MemoryDom {
    elements: BTreeMap<String, MemoryElement>,
    body_classes: BTreeSet<String>,
    title: String,
    query: Option<String>,
    loading: bool,
    no_document: bool,
    icon: Option<IconLink>,
    listeners: BTreeSet<ListenerKind>,
    timers: BTreeMap<u64, (TimerKind, u32)>,
    next_timer: u64,
    frame_requested: bool,
    cleanup_hook: bool,
    banners: Vec<(String, String)>,
    style_writes: Vec<(String, String, String)>,
}

impl MemoryDom {
    /// A fresh, fully loaded page with an empty title and no favicon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with no document at all (server-side rendering).
    #[must_use]
    pub fn without_document() -> Self {
        Self {
            no_document: true,
            ..Self::default()
        }
    }

    /// Sets the raw query string (include the leading `?`).
    pub fn set_query(&mut self, query: &str) {
        self.query = Some(query.to_owned());
    }

    /// Marks the document as still parsing.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Seeds the page title.
    pub fn seed_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    /// Seeds a pre-existing host-page favicon.
    pub fn seed_icon(&mut self, icon: IconLink) {
        self.icon = Some(icon);
    }

    /// Overrides an element's bounding box for drag tests.
    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        if let Some(element) = self.elements.get_mut(id) {
            element.rect = rect;
        }
    }

    /// Pending timers as `(id, kind, delay_ms)`, in creation order.
    #[must_use]
    pub fn pending_timers(&self) -> Vec<(TimerId, TimerKind, u32)> {
        self.timers
            .iter()
            .map(|(&id, &(kind, delay))| (TimerId(id), kind, delay))
            .collect()
    }

    /// Removes a pending timer and returns its kind, simulating it firing.
    /// The caller is responsible for routing the kind into the engine.
    pub fn pop_timer(&mut self, id: TimerId) -> Option<TimerKind> {
        self.timers.remove(&id.0).map(|(kind, _)| kind)
    }

    /// Consumes an outstanding frame request, returning whether one existed.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Whether the global cleanup hook is currently exposed.
    #[must_use]
    pub fn cleanup_hook_exposed(&self) -> bool {
        self.cleanup_hook
    }

    /// Console banners printed so far, as `(text, css)` pairs.
    #[must_use]
    pub fn banners(&self) -> &[(String, String)] {
        &self.banners
    }

    /// Number of inline-style writes of `prop` against the element so far.
    #[must_use]
    pub fn style_write_count(&self, id: &str, prop: &str) -> usize {
        self.style_writes
            .iter()
            .filter(|(wid, wprop, _)| wid == id && wprop == prop)
            .count()
    }

    /// Text content of an element, if it exists.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.text.clone())
    }

    /// Ids of all attached elements, for exhaustive-restoration checks.
    #[must_use]
    pub fn attached_ids(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, el)| el.slot != Slot::Detached)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Installed listener kinds.
    #[must_use]
    pub fn installed_listeners(&self) -> Vec<ListenerKind> {
        self.listeners.iter().copied().collect()
    }
}

impl Dom for MemoryDom {
    fn has_document(&self) -> bool {
        !self.no_document
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn body_ready(&self) -> bool {
        !self.no_document && !self.loading
    }

    fn query_string(&self) -> Option<String> {
        if self.no_document {
            return None;
        }
        self.query.clone()
    }

    fn create_element(&mut self, tag: &str, id: &str) {
        self.elements
            .insert(id.to_owned(), MemoryElement::new(tag));
    }

    fn element_exists(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn tag_name(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.tag.clone())
    }

    fn remove_element(&mut self, id: &str) {
        self.elements.remove(id);
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id).and_then(|el| el.attrs.get(name).cloned())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.to_owned();
        }
    }

    fn append_to_head(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.slot = Slot::Head;
        }
    }

    fn append_to_body(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.slot = Slot::Body;
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.classes.remove(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn set_style(&mut self, id: &str, prop: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.styles.insert(prop.to_owned(), value.to_owned());
            self.style_writes
                .push((id.to_owned(), prop.to_owned(), value.to_owned()));
        }
    }

    fn style(&self, id: &str, prop: &str) -> Option<String> {
        self.elements
            .get(id)
            .and_then(|el| el.styles.get(prop).cloned())
    }

    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).map(|el| el.rect)
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_owned());
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    fn active_icon_link(&self) -> Option<IconLink> {
        self.icon.clone()
    }

    fn set_active_icon_link(&mut self, icon: &IconLink) {
        match &mut self.icon {
            Some(existing) => {
                existing.icon_type = icon.icon_type.clone();
                existing.href = icon.href.clone();
            }
            None => self.icon = Some(icon.clone()),
        }
    }

    fn remove_active_icon_link(&mut self) {
        self.icon = None;
    }

    fn install_listener(&mut self, kind: ListenerKind) {
        self.listeners.insert(kind);
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        self.listeners.remove(&kind);
    }

    fn listener_installed(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(&kind)
    }

    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.next_timer += 1;
        self.timers.insert(self.next_timer, (kind, delay_ms));
        TimerId(self.next_timer)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id.0);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn expose_cleanup_hook(&mut self) {
        self.cleanup_hook = true;
    }

    fn remove_cleanup_hook(&mut self) {
        self.cleanup_hook = false;
    }

    fn console_banner(&mut self, text: &str, css: &str) {
        self.banners.push((text.to_owned(), css.to_owned()));
    }
}
