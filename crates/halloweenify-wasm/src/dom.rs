//! `web-sys` implementation of the document capability.
//!
//! All decision logic lives in the core engine; this adapter only turns
//! trait calls into real DOM calls and browser events back into engine
//! dispatches. Three details need care here:
//!
//! * Elements are created detached and only reachable by id once attached,
//!   so freshly created nodes are parked in a pending map until the engine
//!   appends them.
//! * Every installed handler is a [`Closure`] the adapter owns. A handler
//!   may ask for its own removal while it is still executing (the drag-end
//!   handler does, and so does the exposed cleanup hook), and dropping an
//!   executing closure aborts. Removed closures therefore go to a retired
//!   list that is drained at the start of the next dispatch, when nothing
//!   in it can still be on the stack.
//! * Fired timers must leave the live map before the engine runs, so a
//!   callback that re-arms or clears timers never frees itself.

use std::collections::HashMap;

use halloweenify::ids::CLEANUP_FN;
use halloweenify::{Dom, IconLink, ListenerKind, Rect, TimerId, TimerKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget};

use crate::dispatch;

type EventClosure = Closure<dyn FnMut(Event)>;
type VoidClosure = Closure<dyn FnMut()>;

/// A closure we can no longer drop eagerly.
enum Retired {
    Event(EventClosure),
    Void(VoidClosure),
}

struct InstalledListener {
    target: EventTarget,
    event: &'static str,
    closure: EventClosure,
}

/// Browser-backed [`Dom`].
#[derive(Default)]
pub struct WebDom {
    /// Created-but-not-yet-attached elements, keyed by id.
    pending: HashMap<String, Element>,
    listeners: HashMap<ListenerKind, InstalledListener>,
    timers: HashMap<u64, (i32, VoidClosure)>,
    next_timer: u64,
    frame_closure: Option<VoidClosure>,
    cleanup_closure: Option<VoidClosure>,
    retired: Vec<Retired>,
}

impl WebDom {
    /// Creates the adapter. Cheap; all browser handles are fetched per call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frees closures retired during earlier dispatches. Called at the top
    /// of every dispatch, before any of them can be re-entered.
    pub(crate) fn drain_retired(&mut self) {
        self.retired.clear();
    }

    /// Detaches a fired timer so the engine cannot free it mid-callback.
    /// The returned closure must be held until the dispatch returns.
    pub(crate) fn take_timer(&mut self, id: TimerId) -> Option<VoidClosure> {
        self.timers.remove(&id.0).map(|(_, closure)| closure)
    }

    fn document(&self) -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    /// Looks an element up in the pending map first, then the live tree.
    fn element(&self, id: &str) -> Option<Element> {
        if let Some(el) = self.pending.get(id) {
            return Some(el.clone());
        }
        self.document().and_then(|doc| doc.get_element_by_id(id))
    }

    fn event_name(kind: ListenerKind) -> &'static str {
        match kind {
            ListenerKind::DomReady => "DOMContentLoaded",
            ListenerKind::DragMove | ListenerKind::GhostMove => "mousemove",
            ListenerKind::DragUp => "mouseup",
            ListenerKind::GhostLeave => "mouseout",
            ListenerKind::LogoDblClick => "dblclick",
            ListenerKind::LogoPointerDown => "mousedown",
            ListenerKind::ToggleClick => "click",
        }
    }

    /// The DOM node a listener kind attaches to: the owning element for
    /// element-scoped kinds, the document for delegated ones.
    fn listener_target(&self, kind: ListenerKind) -> Option<EventTarget> {
        match kind {
            ListenerKind::LogoDblClick | ListenerKind::LogoPointerDown => self
                .element(halloweenify::ids::LOGO_ID)
                .map(EventTarget::from),
            ListenerKind::ToggleClick => self
                .element(halloweenify::ids::TOGGLE_BUTTON_ID)
                .map(EventTarget::from),
            _ => self.document().map(EventTarget::from),
        }
    }

    fn make_handler(kind: ListenerKind) -> EventClosure {
        Closure::new(move |event: Event| dispatch::event(kind, &event))
    }

    fn mutate_icon_link<F>(&self, f: F)
    where
        F: FnOnce(&Document, Option<Element>),
    {
        if let Some(doc) = self.document() {
            // The backup placeholder also matches rel*='icon'; skip it.
            let selector = format!(
                "link[rel*='icon']:not(#{})",
                halloweenify::ids::ORIGINAL_FAVICON_ID
            );
            let link = doc.query_selector(&selector).ok().flatten();
            f(&doc, link);
        }
    }
}

impl Dom for WebDom {
    fn has_document(&self) -> bool {
        self.document().is_some()
    }

    fn is_loading(&self) -> bool {
        self.document()
            .is_some_and(|doc| doc.ready_state() == "loading")
    }

    fn body_ready(&self) -> bool {
        self.document().and_then(|doc| doc.body()).is_some()
    }

    fn query_string(&self) -> Option<String> {
        web_sys::window().and_then(|w| w.location().search().ok())
    }

    fn create_element(&mut self, tag: &str, id: &str) {
        if let Some(doc) = self.document() {
            if let Ok(el) = doc.create_element(tag) {
                el.set_id(id);
                self.pending.insert(id.to_owned(), el);
            }
        }
    }

    fn element_exists(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn tag_name(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.tag_name().to_lowercase())
    }

    fn remove_element(&mut self, id: &str) {
        if self.pending.remove(id).is_some() {
            return;
        }
        if let Some(el) = self.element(id) {
            el.remove();
        }
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.element(id).and_then(|el| el.get_attribute(name))
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn append_to_head(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            if let Some(head) = self.document().and_then(|doc| doc.head()) {
                let _ = head.append_child(&el);
                self.pending.remove(id);
            }
        }
    }

    fn append_to_body(&mut self, id: &str) {
        if let Some(el) = self.element(id) {
            if let Some(body) = self.document().and_then(|doc| doc.body()) {
                let _ = body.append_child(&el);
                self.pending.remove(id);
            }
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().remove_1(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn set_style(&mut self, id: &str, prop: &str, value: &str) {
        if let Some(el) = self.element(id) {
            if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
                let _ = html.style().set_property(prop, value);
            }
        }
    }

    fn style(&self, id: &str, prop: &str) -> Option<String> {
        let el = self.element(id)?;
        let html = el.dyn_ref::<web_sys::HtmlElement>()?;
        html.style().get_property_value(prop).ok()
    }

    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.element(id).map(|el| {
            let rect = el.get_bounding_client_rect();
            Rect {
                left: rect.left(),
                top: rect.top(),
            }
        })
    }

    fn add_body_class(&mut self, class: &str) {
        if let Some(body) = self.document().and_then(|doc| doc.body()) {
            let _ = body.class_list().add_1(class);
        }
    }

    fn remove_body_class(&mut self, class: &str) {
        if let Some(body) = self.document().and_then(|doc| doc.body()) {
            let _ = body.class_list().remove_1(class);
        }
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.document()
            .and_then(|doc| doc.body())
            .is_some_and(|body| body.class_list().contains(class))
    }

    fn title(&self) -> String {
        self.document().map(|doc| doc.title()).unwrap_or_default()
    }

    fn set_title(&mut self, title: &str) {
        if let Some(doc) = self.document() {
            doc.set_title(title);
        }
    }

    fn active_icon_link(&self) -> Option<IconLink> {
        let mut found = None;
        self.mutate_icon_link(|_, link| {
            found = link.map(|el| IconLink {
                rel: el.get_attribute("rel").unwrap_or_default(),
                icon_type: el.get_attribute("type").unwrap_or_default(),
                href: el.get_attribute("href").unwrap_or_default(),
            });
        });
        found
    }

    fn set_active_icon_link(&mut self, icon: &IconLink) {
        self.mutate_icon_link(|doc, link| match link {
            Some(el) => {
                let _ = el.set_attribute("type", &icon.icon_type);
                let _ = el.set_attribute("href", &icon.href);
            }
            None => {
                if let Ok(el) = doc.create_element("link") {
                    let _ = el.set_attribute("rel", &icon.rel);
                    let _ = el.set_attribute("type", &icon.icon_type);
                    let _ = el.set_attribute("href", &icon.href);
                    if let Some(head) = doc.head() {
                        let _ = head.append_child(&el);
                    }
                }
            }
        });
    }

    fn remove_active_icon_link(&mut self) {
        self.mutate_icon_link(|_, link| {
            if let Some(el) = link {
                el.remove();
            }
        });
    }

    fn install_listener(&mut self, kind: ListenerKind) {
        let Some(target) = self.listener_target(kind) else {
            return;
        };
        let event = Self::event_name(kind);
        let closure = Self::make_handler(kind);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            return;
        }
        if let Some(old) = self.listeners.insert(
            kind,
            InstalledListener {
                target,
                event,
                closure,
            },
        ) {
            self.retired.push(Retired::Event(old.closure));
        }
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        if let Some(installed) = self.listeners.remove(&kind) {
            let _ = installed.target.remove_event_listener_with_callback(
                installed.event,
                installed.closure.as_ref().unchecked_ref(),
            );
            self.retired.push(Retired::Event(installed.closure));
        }
    }

    fn listener_installed(&self, kind: ListenerKind) -> bool {
        self.listeners.contains_key(&kind)
    }

    fn set_timeout(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let closure: VoidClosure = Closure::new(move || dispatch::timer_fired(kind, id));
        if let Some(window) = web_sys::window() {
            if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            ) {
                self.timers.insert(id.0, (handle, closure));
                return id;
            }
        }
        // Scheduling failed; keep the closure around so its slot stays
        // inert if the engine later clears it.
        self.retired.push(Retired::Void(closure));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some((handle, closure)) = self.timers.remove(&id.0) {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
            self.retired.push(Retired::Void(closure));
        }
    }

    fn request_frame(&mut self) {
        let closure = self
            .frame_closure
            .get_or_insert_with(|| Closure::new(|| dispatch::frame()));
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }

    fn expose_cleanup_hook(&mut self) {
        let closure: VoidClosure = Closure::new(|| dispatch::cleanup_invoked());
        let key = JsValue::from_str(CLEANUP_FN);
        if js_sys::Reflect::set(&js_sys::global(), &key, closure.as_ref()).is_ok() {
            if let Some(old) = self.cleanup_closure.replace(closure) {
                self.retired.push(Retired::Void(old));
            }
        } else {
            self.retired.push(Retired::Void(closure));
        }
    }

    fn remove_cleanup_hook(&mut self) {
        let key = JsValue::from_str(CLEANUP_FN);
        let global = js_sys::global();
        if js_sys::Reflect::delete_property(&global, &key).is_err() {
            // Some hosts refuse deletion; blanking the slot is enough.
            let _ = js_sys::Reflect::set(&global, &key, &JsValue::UNDEFINED);
        }
        if let Some(closure) = self.cleanup_closure.take() {
            self.retired.push(Retired::Void(closure));
        }
    }

    fn console_banner(&mut self, text: &str, css: &str) {
        web_sys::console::log_2(&JsValue::from_str(text), &JsValue::from_str(css));
    }
}
