//! End-to-end engine tests: activation gating, idempotent injection,
//! deferral, exhaustive restoration, the disable toggle, and the drag
//! gesture, all against the in-memory page model.

use halloweenify::ids::{
    ACTIVE_BODY_CLASS, GHOST_LINK_ID, LOGO_ID, ORIGINAL_FAVICON_ID, STYLE_ID, THEME_COLOR_META_ID,
    TOGGLE_BUTTON_ID, USER_DISABLE_KEY,
};
use halloweenify::{
    Dom, DragPhase, Engine, FixedClock, IconLink, KeyValueStore, ListenerKind, MemoryDom,
    MemoryStore, Options, Rect,
};

fn themed_options() -> Options {
    Options {
        overlay_logo_path: Some("/assets/witch.png".to_owned()),
        favicon_path: Some("/assets/pumpkin.ico".to_owned()),
        ..Options::default()
    }
}

fn halloween_engine() -> Engine<MemoryDom, MemoryStore, FixedClock> {
    Engine::new(MemoryDom::new(), MemoryStore::new(), FixedClock::halloween())
}

#[test]
fn halloween_applies_the_full_theme() {
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site");
    engine.apply(themed_options());

    let dom = engine.dom();
    assert!(dom.body_has_class(ACTIVE_BODY_CLASS));
    assert!(dom.element_exists(STYLE_ID));
    assert!(dom.element_exists(THEME_COLOR_META_ID));
    assert!(dom.element_exists(LOGO_ID));
    assert!(dom.element_exists(TOGGLE_BUTTON_ID));
    assert!(dom.element_exists(GHOST_LINK_ID));
    assert_eq!(dom.title(), "🎃 My Site");
    assert_eq!(
        dom.active_icon_link().map(|icon| icon.href),
        Some("/assets/pumpkin.ico".to_owned())
    );
    assert_eq!(dom.banners().len(), 1);
    assert!(dom.listener_installed(ListenerKind::GhostMove));
    assert!(dom.listener_installed(ListenerKind::ToggleClick));
    assert!(dom.listener_installed(ListenerKind::LogoDblClick));
}

#[test]
fn off_season_page_is_untouched() {
    let mut engine = Engine::new(MemoryDom::new(), MemoryStore::new(), FixedClock::midsummer());
    engine.dom_mut().seed_title("My Site");
    engine.apply(themed_options());

    let dom = engine.dom();
    assert!(!dom.body_has_class(ACTIVE_BODY_CLASS));
    assert!(dom.attached_ids().is_empty());
    assert!(dom.installed_listeners().is_empty());
    assert_eq!(dom.title(), "My Site");
    assert!(dom.banners().is_empty());
}

#[test]
fn url_flag_overrides_the_calendar() {
    let mut engine = Engine::new(MemoryDom::new(), MemoryStore::new(), FixedClock::midsummer());
    engine.dom_mut().set_query("?utm=x&spooky=true");
    engine.apply(Options::default());
    assert!(engine.dom().element_exists(STYLE_ID));
}

#[test]
fn force_overrides_the_calendar() {
    let mut engine = Engine::new(MemoryDom::new(), MemoryStore::new(), FixedClock::midsummer());
    engine.apply(Options {
        force: true,
        ..Options::default()
    });
    assert!(engine.dom().element_exists(STYLE_ID));
}

#[test]
fn user_disable_beats_force() {
    let clock = FixedClock::halloween();
    let mut store = MemoryStore::new();
    store.seed(USER_DISABLE_KEY, &(clock.now_ms + 10_000).to_string());

    let mut engine = Engine::new(MemoryDom::new(), store, clock);
    engine.apply(Options {
        force: true,
        ..Options::default()
    });
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn applying_twice_injects_nothing_twice() {
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site");
    engine.apply(themed_options());
    let attached = engine.dom().attached_ids();
    let timers = engine.dom().pending_timers().len();

    engine.apply(themed_options());
    assert_eq!(engine.dom().attached_ids(), attached);
    assert_eq!(engine.dom().pending_timers().len(), timers);
    // No double title prefix either.
    assert_eq!(engine.dom().title(), "🎃 My Site");
}

#[test]
fn reapply_cannot_desync_meta_color_from_stylesheet() {
    let mut engine = halloween_engine();
    engine.apply(themed_options());
    assert_eq!(
        engine.dom().attr(THEME_COLOR_META_ID, "content").as_deref(),
        Some("#FAF8F1")
    );

    // A texture selects the dark palette, but the light stylesheet is
    // already injected; the meta color must stay with it.
    engine.apply(Options {
        background_texture_path: Some("/textures/night.png".to_owned()),
        ..themed_options()
    });
    assert_eq!(
        engine.dom().attr(THEME_COLOR_META_ID, "content").as_deref(),
        Some("#FAF8F1")
    );
}

#[test]
fn no_document_context_is_a_no_op() {
    let mut engine = Engine::new(
        MemoryDom::without_document(),
        MemoryStore::new(),
        FixedClock::halloween(),
    );
    engine.apply(themed_options());
    engine.remove();
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn activation_defers_until_the_page_is_ready() {
    let mut engine = halloween_engine();
    engine.dom_mut().set_loading(true);
    engine.apply(themed_options());

    assert!(engine.dom().listener_installed(ListenerKind::DomReady));
    assert!(!engine.dom().element_exists(STYLE_ID));

    engine.dom_mut().set_loading(false);
    engine.on_dom_ready();
    assert!(!engine.dom().listener_installed(ListenerKind::DomReady));
    assert!(engine.dom().element_exists(STYLE_ID));
    assert!(engine.dom().element_exists(LOGO_ID));
}

#[test]
fn removal_before_page_ready_cancels_the_deferred_activation() {
    let mut engine = halloween_engine();
    engine.dom_mut().set_loading(true);
    engine.apply(themed_options());
    engine.remove();

    assert!(!engine.dom().listener_installed(ListenerKind::DomReady));
    engine.dom_mut().set_loading(false);
    engine.on_dom_ready();
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn restoration_is_exhaustive_and_byte_exact() {
    let original_icon = IconLink {
        rel: "icon".to_owned(),
        icon_type: "image/png".to_owned(),
        href: "/original.png".to_owned(),
    };
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site | Home");
    engine.dom_mut().seed_icon(original_icon.clone());

    engine.apply(Options {
        expose_cleanup: true,
        ..themed_options()
    });
    assert!(engine.dom().cleanup_hook_exposed());
    assert!(engine.dom().element_exists(ORIGINAL_FAVICON_ID));

    engine.remove();

    let dom = engine.dom();
    assert!(dom.attached_ids().is_empty());
    assert!(dom.installed_listeners().is_empty());
    assert!(dom.pending_timers().is_empty());
    assert!(!dom.body_has_class(ACTIVE_BODY_CLASS));
    assert!(!dom.cleanup_hook_exposed());
    assert_eq!(dom.title(), "My Site | Home");
    assert_eq!(dom.active_icon_link(), Some(original_icon));
}

#[test]
fn removal_is_idempotent() {
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site");
    engine.apply(themed_options());
    engine.remove();
    engine.remove();
    assert_eq!(engine.dom().title(), "My Site");
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn removal_mid_drag_tears_the_gesture_down() {
    let mut engine = halloween_engine();
    engine.apply(themed_options());
    engine
        .dom_mut()
        .set_rect(LOGO_ID, Rect { left: 50.0, top: 60.0 });

    engine.on_logo_dblclick();
    engine.on_logo_pointer_down(55.0, 65.0);
    engine.on_drag_move(80.0, 90.0);
    assert_eq!(engine.drag_phase(), DragPhase::Dragging);

    engine.remove();
    assert_eq!(engine.drag_phase(), DragPhase::Idle);
    assert!(engine.dom().installed_listeners().is_empty());

    // A straggler frame callback after teardown mutates nothing.
    engine.on_frame();
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn drag_gesture_moves_the_logo_through_the_engine() {
    let mut engine = halloween_engine();
    engine.apply(themed_options());
    engine
        .dom_mut()
        .set_rect(LOGO_ID, Rect { left: 100.0, top: 40.0 });

    engine.on_logo_dblclick();
    engine.on_logo_pointer_down(110.0, 50.0);
    engine.on_drag_move(310.0, 250.0);
    assert!(engine.dom_mut().take_frame_request());
    engine.on_frame();

    assert_eq!(engine.dom().style(LOGO_ID, "left").as_deref(), Some("300px"));
    assert_eq!(engine.dom().style(LOGO_ID, "top").as_deref(), Some("240px"));

    engine.on_drag_end();
    assert_eq!(engine.drag_phase(), DragPhase::Armed);
}

#[test]
fn toggle_click_restores_and_suppresses_reactivation() {
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site");
    engine.apply(themed_options());

    engine.on_toggle_click();
    assert!(engine.dom().attached_ids().is_empty());
    assert_eq!(engine.dom().title(), "My Site");
    assert_eq!(
        engine
            .store()
            .get(USER_DISABLE_KEY)
            .ok()
            .flatten()
            .as_deref(),
        Some("2000000")
    );

    // Even a forced re-apply stays off for the rest of the day.
    engine.apply(Options {
        force: true,
        ..themed_options()
    });
    assert!(engine.dom().attached_ids().is_empty());
}

#[test]
fn hint_timers_route_through_the_engine() {
    let mut engine = halloween_engine();
    engine.apply(themed_options());

    let (id, kind, _) = engine.dom().pending_timers()[0];
    engine.dom_mut().pop_timer(id);
    engine.on_timer(kind);

    let (id, kind, _) = engine.dom().pending_timers()[0];
    engine.dom_mut().pop_timer(id);
    engine.on_timer(kind);

    assert!(engine.dom().pending_timers().is_empty());
    assert!(!engine.dom().element_exists(halloweenify::ids::HINT_BUBBLE_ID));
}

#[test]
fn ghost_marker_follows_the_pointer_over_links() {
    let mut engine = halloween_engine();
    engine.apply(themed_options());

    engine.on_ghost_move(120.0, 80.0, true);
    assert!(engine.dom().has_class(GHOST_LINK_ID, "visible"));

    engine.on_ghost_move(130.0, 90.0, false);
    assert!(!engine.dom().has_class(GHOST_LINK_ID, "visible"));

    engine.on_ghost_move(140.0, 95.0, true);
    engine.on_ghost_leave(true);
    assert!(!engine.dom().has_class(GHOST_LINK_ID, "visible"));
}

#[test]
fn disabled_features_leave_no_trace() {
    let mut engine = halloween_engine();
    engine.dom_mut().seed_title("My Site");
    engine.apply(Options {
        enable_ghost_links: false,
        enable_user_toggle: false,
        enable_title_emoji: false,
        enable_console_message: false,
        ..themed_options()
    });

    let dom = engine.dom();
    assert!(dom.element_exists(STYLE_ID));
    assert!(!dom.element_exists(GHOST_LINK_ID));
    assert!(!dom.element_exists(TOGGLE_BUTTON_ID));
    assert_eq!(dom.title(), "My Site");
    assert!(dom.banners().is_empty());
    assert!(!dom.listener_installed(ListenerKind::GhostMove));
    assert!(!dom.listener_installed(ListenerKind::ToggleClick));
}

#[test]
fn logo_needs_a_source_path() {
    let mut engine = halloween_engine();
    engine.apply(Options::default());
    assert!(engine.dom().element_exists(STYLE_ID));
    assert!(!engine.dom().element_exists(LOGO_ID));
    assert!(!engine.dom().listener_installed(ListenerKind::LogoDblClick));
}
