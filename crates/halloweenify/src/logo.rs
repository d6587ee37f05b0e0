//! Overlay logo and its drag protocol.
//!
//! The logo moves through three phases: idle (default), armed (entered by
//! double-click, leaves the logo draggable), and dragging (pointer held
//! down while armed). Position updates during a drag are coalesced to at
//! most one DOM write per animation frame: pointer moves only overwrite
//! the pending target coordinates, and a single frame callback applies the
//! latest pair.
//!
//! An optional hint bubble appears at injection time and dismisses itself
//! after a fixed delay in two stages (fade, then detach), or immediately on
//! the first double-click or pointer-down.

use crate::dom::{Dom, ListenerKind, TimerKind};
use crate::ids::{HINT_BUBBLE_ID, HINT_FADE_MS, HINT_REMOVE_MS, LOGO_ID};
use crate::session::Session;

/// Phase of the logo's drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Not draggable.
    #[default]
    Idle,
    /// Draggable; a pointer-down starts a gesture.
    Armed,
    /// A gesture is in progress.
    Dragging,
}

/// Drag bookkeeping. Offsets are the grab point within the logo's box;
/// `last_*` hold the most recent target position, applied on the next
/// animation frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    /// Current phase.
    pub phase: DragPhase,
    pub(crate) offset_x: f64,
    pub(crate) offset_y: f64,
    pub(crate) last_x: f64,
    pub(crate) last_y: f64,
    pub(crate) frame_scheduled: bool,
}

const HINT_TEXT: &str = "JOYEUX HALLOWEEN ! Double-cliquez pour me déplacer !";

/// Injects the logo image (and optional hint bubble). No-op if present.
pub(crate) fn inject(dom: &mut impl Dom, session: &mut Session, src: &str, show_hint: bool) {
    if !dom.body_ready() || dom.element_exists(LOGO_ID) {
        return;
    }

    dom.create_element("img", LOGO_ID);
    dom.set_attr(LOGO_ID, "src", src);
    dom.set_attr(LOGO_ID, "alt", "Illustration d'Halloween");
    dom.install_listener(ListenerKind::LogoDblClick);
    dom.install_listener(ListenerKind::LogoPointerDown);
    dom.append_to_body(LOGO_ID);

    if show_hint {
        dom.create_element("div", HINT_BUBBLE_ID);
        dom.set_text(HINT_BUBBLE_ID, HINT_TEXT);
        dom.set_style(HINT_BUBBLE_ID, "opacity", "1");
        dom.append_to_body(HINT_BUBBLE_ID);
        session.hint_fade_timer = Some(dom.set_timeout(TimerKind::HintFade, HINT_FADE_MS));
    }
}

/// Removes the hint bubble and cancels its timers. Safe to call at any
/// point, any number of times.
pub(crate) fn dismiss_hint(dom: &mut impl Dom, session: &mut Session) {
    if let Some(id) = session.hint_fade_timer.take() {
        dom.clear_timeout(id);
    }
    if let Some(id) = session.hint_remove_timer.take() {
        dom.clear_timeout(id);
    }
    dom.remove_element(HINT_BUBBLE_ID);
}

/// First stage of the hint auto-dismiss: start the fade and schedule the
/// detach.
pub(crate) fn on_hint_fade_elapsed(dom: &mut impl Dom, session: &mut Session) {
    session.hint_fade_timer = None;
    if !dom.element_exists(HINT_BUBBLE_ID) {
        return;
    }
    dom.add_class(HINT_BUBBLE_ID, "fade-out");
    session.hint_remove_timer = Some(dom.set_timeout(TimerKind::HintRemove, HINT_REMOVE_MS));
}

/// Second stage: detach the bubble once the transition has played.
pub(crate) fn on_hint_remove_elapsed(dom: &mut impl Dom, session: &mut Session) {
    session.hint_remove_timer = None;
    dismiss_hint(dom, session);
}

/// Double-click: toggle idle/armed and dismiss the hint.
pub(crate) fn on_dblclick(dom: &mut impl Dom, session: &mut Session) {
    dismiss_hint(dom, session);
    match session.drag.phase {
        DragPhase::Idle => {
            session.drag.phase = DragPhase::Armed;
            dom.add_class(LOGO_ID, "is-draggable");
        }
        DragPhase::Armed => {
            session.drag.phase = DragPhase::Idle;
            dom.remove_class(LOGO_ID, "is-draggable");
        }
        // Mid-gesture double-clicks are noise.
        DragPhase::Dragging => {}
    }
}

/// Pointer-down on the logo: start a gesture when armed.
pub(crate) fn on_pointer_down(dom: &mut impl Dom, session: &mut Session, x: f64, y: f64) {
    if session.drag.phase != DragPhase::Armed {
        return;
    }
    dismiss_hint(dom, session);

    let rect = dom.bounding_rect(LOGO_ID).unwrap_or_default();
    session.drag.phase = DragPhase::Dragging;
    session.drag.offset_x = x - rect.left;
    session.drag.offset_y = y - rect.top;
    session.drag.frame_scheduled = false;
    dom.add_class(LOGO_ID, "is-dragging");

    // Pin the element at its current box in absolute pixels so the anchor
    // styles (centering transform, right/bottom pins) stop fighting the
    // drag coordinates.
    dom.set_style(LOGO_ID, "top", &format!("{}px", rect.top));
    dom.set_style(LOGO_ID, "left", &format!("{}px", rect.left));
    dom.set_style(LOGO_ID, "transform", "none");
    dom.set_style(LOGO_ID, "right", "auto");
    dom.set_style(LOGO_ID, "bottom", "auto");

    dom.install_listener(ListenerKind::DragMove);
    dom.install_listener(ListenerKind::DragUp);
}

/// Pointer moved during a gesture: record the target, request at most one
/// frame.
pub(crate) fn on_drag_move(dom: &mut impl Dom, session: &mut Session, x: f64, y: f64) {
    if session.drag.phase != DragPhase::Dragging {
        return;
    }
    session.drag.last_x = x - session.drag.offset_x;
    session.drag.last_y = y - session.drag.offset_y;

    if session.drag.frame_scheduled {
        return;
    }
    session.drag.frame_scheduled = true;
    dom.request_frame();
}

/// Animation frame: apply the latest recorded position.
pub(crate) fn on_frame(dom: &mut impl Dom, session: &mut Session) {
    if session.drag.phase == DragPhase::Dragging {
        dom.set_style(LOGO_ID, "left", &format!("{}px", session.drag.last_x));
        dom.set_style(LOGO_ID, "top", &format!("{}px", session.drag.last_y));
    }
    session.drag.frame_scheduled = false;
}

/// Pointer released: end the gesture, back to armed.
pub(crate) fn on_drag_end(dom: &mut impl Dom, session: &mut Session) {
    dom.remove_class(LOGO_ID, "is-dragging");
    if session.drag.phase == DragPhase::Dragging {
        session.drag.phase = DragPhase::Armed;
    }
    session.drag.frame_scheduled = false;
    dom.remove_listener(ListenerKind::DragMove);
    dom.remove_listener(ListenerKind::DragUp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, Rect};

    fn injected() -> (MemoryDom, Session) {
        let mut dom = MemoryDom::new();
        let mut session = Session::default();
        inject(&mut dom, &mut session, "/logo.png", true);
        (dom, session)
    }

    #[test]
    fn inject_is_idempotent() {
        let (mut dom, mut session) = injected();
        let timers_before = dom.pending_timers().len();
        inject(&mut dom, &mut session, "/other.png", true);
        assert_eq!(dom.attr(LOGO_ID, "src").as_deref(), Some("/logo.png"));
        assert_eq!(dom.pending_timers().len(), timers_before);
    }

    #[test]
    fn dblclick_toggles_armed() {
        let (mut dom, mut session) = injected();

        on_dblclick(&mut dom, &mut session);
        assert_eq!(session.drag.phase, DragPhase::Armed);
        assert!(dom.has_class(LOGO_ID, "is-draggable"));
        // The hint goes away on the first double-click.
        assert!(!dom.element_exists(HINT_BUBBLE_ID));
        assert!(dom.pending_timers().is_empty());

        on_dblclick(&mut dom, &mut session);
        assert_eq!(session.drag.phase, DragPhase::Idle);
        assert!(!dom.has_class(LOGO_ID, "is-draggable"));
    }

    #[test]
    fn pointer_down_requires_armed() {
        let (mut dom, mut session) = injected();
        on_pointer_down(&mut dom, &mut session, 100.0, 100.0);
        assert_eq!(session.drag.phase, DragPhase::Idle);
        assert!(!dom.listener_installed(ListenerKind::DragMove));
    }

    #[test]
    fn pointer_down_pins_absolute_coordinates() {
        let (mut dom, mut session) = injected();
        dom.set_rect(LOGO_ID, Rect { left: 200.0, top: 120.0 });

        on_dblclick(&mut dom, &mut session);
        on_pointer_down(&mut dom, &mut session, 230.0, 150.0);

        assert_eq!(session.drag.phase, DragPhase::Dragging);
        assert!(dom.has_class(LOGO_ID, "is-dragging"));
        assert_eq!(dom.style(LOGO_ID, "left").as_deref(), Some("200px"));
        assert_eq!(dom.style(LOGO_ID, "top").as_deref(), Some("120px"));
        assert_eq!(dom.style(LOGO_ID, "transform").as_deref(), Some("none"));
        assert_eq!(dom.style(LOGO_ID, "right").as_deref(), Some("auto"));
        assert!(dom.listener_installed(ListenerKind::DragMove));
        assert!(dom.listener_installed(ListenerKind::DragUp));
    }

    #[test]
    fn moves_between_frames_coalesce_to_one_write() {
        let (mut dom, mut session) = injected();
        dom.set_rect(LOGO_ID, Rect { left: 200.0, top: 120.0 });
        on_dblclick(&mut dom, &mut session);
        on_pointer_down(&mut dom, &mut session, 230.0, 150.0);
        let writes_after_pin = dom.style_write_count(LOGO_ID, "left");

        // Three moves before the frame fires: one frame request, no writes.
        on_drag_move(&mut dom, &mut session, 240.0, 160.0);
        on_drag_move(&mut dom, &mut session, 250.0, 170.0);
        on_drag_move(&mut dom, &mut session, 260.0, 180.0);
        assert!(dom.take_frame_request());
        assert!(!dom.frame_requested());
        assert_eq!(dom.style_write_count(LOGO_ID, "left"), writes_after_pin);

        on_frame(&mut dom, &mut session);
        assert_eq!(dom.style_write_count(LOGO_ID, "left"), writes_after_pin + 1);
        // Final position = last pointer minus the grab offset (30, 30).
        assert_eq!(dom.style(LOGO_ID, "left").as_deref(), Some("230px"));
        assert_eq!(dom.style(LOGO_ID, "top").as_deref(), Some("150px"));
    }

    #[test]
    fn new_moves_after_a_frame_request_again() {
        let (mut dom, mut session) = injected();
        dom.set_rect(LOGO_ID, Rect { left: 0.0, top: 0.0 });
        on_dblclick(&mut dom, &mut session);
        on_pointer_down(&mut dom, &mut session, 10.0, 10.0);

        on_drag_move(&mut dom, &mut session, 20.0, 20.0);
        assert!(dom.take_frame_request());
        on_frame(&mut dom, &mut session);

        on_drag_move(&mut dom, &mut session, 30.0, 30.0);
        assert!(dom.take_frame_request());
        on_frame(&mut dom, &mut session);
        assert_eq!(dom.style(LOGO_ID, "left").as_deref(), Some("20px"));
    }

    #[test]
    fn drag_end_returns_to_armed() {
        let (mut dom, mut session) = injected();
        on_dblclick(&mut dom, &mut session);
        on_pointer_down(&mut dom, &mut session, 5.0, 5.0);
        on_drag_move(&mut dom, &mut session, 8.0, 8.0);
        on_drag_end(&mut dom, &mut session);

        assert_eq!(session.drag.phase, DragPhase::Armed);
        assert!(!dom.has_class(LOGO_ID, "is-dragging"));
        assert!(!dom.listener_installed(ListenerKind::DragMove));
        assert!(!dom.listener_installed(ListenerKind::DragUp));
        assert!(!session.drag.frame_scheduled);

        // A straggler frame after the gesture writes nothing.
        let writes = dom.style_write_count(LOGO_ID, "left");
        on_frame(&mut dom, &mut session);
        assert_eq!(dom.style_write_count(LOGO_ID, "left"), writes);
    }

    #[test]
    fn hint_fades_in_two_stages() {
        let (mut dom, mut session) = injected();
        let (fade_id, kind, delay) = dom.pending_timers()[0];
        assert_eq!(kind, TimerKind::HintFade);
        assert_eq!(delay, HINT_FADE_MS);

        dom.pop_timer(fade_id);
        on_hint_fade_elapsed(&mut dom, &mut session);
        assert!(dom.has_class(HINT_BUBBLE_ID, "fade-out"));

        let (remove_id, kind, delay) = dom.pending_timers()[0];
        assert_eq!(kind, TimerKind::HintRemove);
        assert_eq!(delay, HINT_REMOVE_MS);

        dom.pop_timer(remove_id);
        on_hint_remove_elapsed(&mut dom, &mut session);
        assert!(!dom.element_exists(HINT_BUBBLE_ID));
        assert!(dom.pending_timers().is_empty());
    }

    #[test]
    fn pointer_down_cancels_the_hint() {
        let (mut dom, mut session) = injected();
        on_dblclick(&mut dom, &mut session); // arms and already dismisses
        inject(&mut dom, &mut session, "/logo.png", true); // no-op, logo exists
        on_pointer_down(&mut dom, &mut session, 1.0, 1.0);
        assert!(!dom.element_exists(HINT_BUBBLE_ID));
        assert!(dom.pending_timers().is_empty());
    }

    #[test]
    fn no_hint_when_disabled() {
        let mut dom = MemoryDom::new();
        let mut session = Session::default();
        inject(&mut dom, &mut session, "/logo.png", false);
        assert!(!dom.element_exists(HINT_BUBBLE_ID));
        assert!(dom.pending_timers().is_empty());
    }
}
