//! Edit mode: dragging and resizing floating zones.

use crate::helpers::{TestEngine, TestSettingsBuilder, floating};
use scrollnice::input::InputState;
use scrollnice::settings::EditBehavior;
use scrollnice::state_machine::AppState;
use scrollnice::types::{Edge, MouseButton, Point, Rect, ScrollMode, ZoneConfig, ZoneKind, ZoneSpan};

/// Engine with `zone` as its only zone, already in edit mode.
fn editing(zone: ZoneConfig) -> TestEngine {
    let mut t = TestEngine::new(TestSettingsBuilder::new().with_zone(zone).build());
    assert!(t.engine.toggle_edit());
    t
}

fn floating_kind(t: &TestEngine, index: usize) -> ZoneKind {
    t.engine.zone_config(index).unwrap().kind
}

#[test]
fn test_drag_moves_zone() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    t.press(MouseButton::Left, 210, 210, 0);
    assert_eq!(
        t.engine.edit_gesture(),
        InputState::DraggingZone {
            zone: 0,
            grab_offset: Point::new(10, 10)
        }
    );

    t.move_to(310, 410);
    assert_eq!(t.engine.zones()[0].rect, Rect::from_xywh(300, 400, 120, 180));
    let shown = t.last_presented().unwrap();
    assert_eq!(shown.zone_rects[0], Rect::from_xywh(300, 400, 120, 180));

    t.release(MouseButton::Left, 310, 410, 100);
    assert!(t.engine.edit_gesture().is_idle());
    assert_eq!(
        floating_kind(&t, 0),
        ZoneKind::Floating {
            x: 300,
            y: 400,
            width: 120,
            height: 180
        }
    );

    let edited = t.presenter.edited.borrow();
    assert_eq!(edited.len(), 1);
    assert_eq!(edited[0].0, 0);
    assert_eq!(edited[0].1.kind, floating_kind(&t, 0));
}

#[test]
fn test_drag_is_clamped_to_work_area() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    t.press(MouseButton::Left, 210, 210, 0);
    t.move_to(1900, 1070);
    assert_eq!(t.engine.zones()[0].rect.origin(), Point::new(1800, 900));

    t.move_to(-50, -50);
    assert_eq!(t.engine.zones()[0].rect.origin(), Point::new(0, 0));
}

#[test]
fn test_resize_from_handle() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    // Bottom-right corner, inside the 16 px handle
    t.press(MouseButton::Left, 315, 375, 0);
    assert!(t.engine.edit_gesture().is_resizing());

    t.move_to(355, 415);
    t.release(MouseButton::Left, 355, 415, 50);
    assert_eq!(
        floating_kind(&t, 0),
        ZoneKind::Floating {
            x: 200,
            y: 200,
            width: 160,
            height: 220
        }
    );
    assert_eq!(t.presenter.edited.borrow().len(), 1);
}

#[test]
fn test_resize_never_goes_below_minimum() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    t.press(MouseButton::Left, 315, 375, 0);
    t.move_to(215, 215);
    assert_eq!(t.engine.zones()[0].rect, Rect::from_xywh(200, 200, 60, 60));
}

#[test]
fn test_locked_zone_is_not_editable() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold).with_locked(true));
    t.press(MouseButton::Left, 210, 210, 0);
    assert!(t.engine.edit_gesture().is_idle());

    t.move_to(400, 400);
    t.release(MouseButton::Left, 400, 400, 10);
    assert_eq!(t.engine.zones()[0].rect, Rect::from_xywh(200, 200, 120, 180));
    assert!(t.presenter.edited.borrow().is_empty());
}

#[test]
fn test_edge_zone_is_not_editable() {
    let edge = ZoneConfig::edge(
        Edge::Left,
        20,
        ZoneSpan::Percent {
            height_percent: 100.0,
        },
    );
    let mut t = editing(edge);
    t.press(MouseButton::Left, 5, 500, 0);
    assert!(t.engine.edit_gesture().is_idle());
}

#[test]
fn test_right_button_does_not_grab() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    t.press(MouseButton::Right, 210, 210, 0);
    assert!(t.engine.edit_gesture().is_idle());
}

#[test]
fn test_editing_suspends_scrolling() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::ClickUpDown));
    t.press(MouseButton::Left, 250, 250, 0);
    t.release(MouseButton::Left, 250, 250, 10);
    t.press(MouseButton::Right, 250, 250, 20);
    assert!(t.deltas().is_empty());
    assert_eq!(t.timer_running(), None);
    assert_eq!(t.engine.state(), AppState::Edit);
}

#[test]
fn test_overlay_only_keeps_click_scrolling() {
    let mut t = TestEngine::new(
        TestSettingsBuilder::new()
            .with_zone(floating(200, 200, 120, 180, ScrollMode::ClickUpDown))
            .with_edit_behavior(EditBehavior::OverlayOnly)
            .build(),
    );
    t.engine.toggle_edit();
    t.press(MouseButton::Left, 250, 250, 0);
    assert_eq!(t.deltas(), vec![120, 120, 120]);
    assert!(t.engine.edit_gesture().is_idle());
}

#[test]
fn test_leaving_edit_mid_drag_commits() {
    let mut t = editing(floating(200, 200, 120, 180, ScrollMode::Hold));
    t.press(MouseButton::Left, 210, 210, 0);
    t.move_to(510, 510);

    assert!(!t.engine.toggle_edit());
    assert_eq!(t.engine.state(), AppState::Idle);
    assert!(t.engine.edit_gesture().is_idle());
    assert_eq!(t.presenter.edited.borrow().len(), 1);
    assert_eq!(t.engine.zones()[0].rect.origin(), Point::new(500, 500));
}

#[test]
fn test_entering_edit_ends_velocity_session() {
    let mut t = TestEngine::new(
        TestSettingsBuilder::new()
            .with_zone(floating(200, 200, 120, 180, ScrollMode::Velocity))
            .build(),
    );
    t.move_to(250, 250);
    t.move_to(250, 300);
    assert_eq!(t.engine.state(), AppState::Active);

    t.engine.toggle_edit();
    assert_eq!(t.engine.state(), AppState::Edit);
    assert_eq!(t.timer_running(), None);

    t.move_to(250, 350);
    assert_eq!(t.engine.state(), AppState::Edit);
}

#[test]
fn test_entering_edit_ends_hold() {
    let mut t = TestEngine::new(
        TestSettingsBuilder::new()
            .with_zone(floating(200, 200, 120, 180, ScrollMode::Hold))
            .build(),
    );
    t.press(MouseButton::Left, 250, 250, 0);
    assert!(t.timer_running().is_some());

    t.engine.toggle_edit();
    assert_eq!(t.timer_running(), None);
    t.tick(1_000_000);
    assert!(t.deltas().is_empty());
}
