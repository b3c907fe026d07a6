//! Unit tests for settings persistence and sanitizing.

use scrollnice::constants::{
    MAX_SCROLL_AMOUNT_PX, MAX_TICK_MS, MIN_ZONE_SIZE, SCREEN_COORD_LIMIT, SETTINGS_VERSION,
};
use scrollnice::error::SettingsError;
use scrollnice::geometry::ZoneGeometryResolver;
use scrollnice::platform::StaticDisplay;
use scrollnice::settings::{BypassModifier, EditBehavior, Settings, WheelBlockMode};
use scrollnice::types::{Edge, Modifiers, Rect, ScrollMode, ZoneConfig, ZoneKind, ZoneSpan};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.scroll.mode = ScrollMode::SplitLeftRight;
    settings.wheel_block.mode = WheelBlockMode::InsideZoneOnly;
    settings.zones.push(
        ZoneConfig::floating(40, 50, 200, 300)
            .with_name("Reader")
            .with_locked(true),
    );
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_or_default(&dir.path().join("absent.json"));
    let defaults = Settings::default();
    assert_eq!(settings.engine, defaults.engine);
    assert_eq!(settings.scroll, defaults.scroll);
    assert_eq!(settings.zones.len(), 1);
    assert_eq!(settings.zones[0].kind, defaults.zones[0].kind);
}

#[test]
fn test_malformed_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(Settings::load_from(&path), Err(SettingsError::Json(_))));
    let settings = Settings::load_or_default(&path);
    assert!(settings.enabled);
    assert_eq!(settings.zones.len(), 1);
}

#[test]
fn test_future_version_is_rejected() {
    let json = format!(r#"{{"version": {}}}"#, SETTINGS_VERSION + 1);
    assert!(matches!(
        Settings::from_json(&json),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn test_older_version_is_upgraded() {
    let settings = Settings::from_json(r#"{"version": 1}"#).unwrap();
    assert_eq!(settings.version, SETTINGS_VERSION);
}

#[test]
fn test_zone_json_layouts() {
    let json = r#"{
        "zones": [
            {"kind": "edge", "edge": "right", "thickness": 10, "height_percent": 100},
            {"kind": "edge", "edge": "top", "thickness": 6, "height": 400},
            {"kind": "floating", "x": 100, "y": 120, "width": 90, "height": 200,
             "scroll_mode": "continuous", "block_wheel": false}
        ]
    }"#;
    let settings = Settings::from_json(json).unwrap();
    assert_eq!(settings.zones.len(), 3);

    assert_eq!(
        settings.zones[0].kind,
        ZoneKind::Edge {
            edge: Edge::Right,
            thickness: 10,
            span: ZoneSpan::Percent {
                height_percent: 100.0
            },
        }
    );
    assert_eq!(
        settings.zones[1].kind,
        ZoneKind::Edge {
            edge: Edge::Top,
            thickness: 6,
            span: ZoneSpan::Fixed { height: 400 },
        }
    );

    let floating = &settings.zones[2];
    assert_eq!(floating.scroll_mode, Some(ScrollMode::Hold));
    assert_eq!(floating.block_wheel, Some(false));
    assert!(floating.enabled);
    assert!(!floating.locked);
}

#[test]
fn test_legacy_mode_names() {
    let settings = Settings::from_json(r#"{"scroll": {"mode": "click_lr"}}"#).unwrap();
    assert_eq!(settings.scroll.mode, ScrollMode::ClickUpDown);
    let settings = Settings::from_json(r#"{"scroll": {"mode": "split_lr"}}"#).unwrap();
    assert_eq!(settings.scroll.mode, ScrollMode::SplitLeftRight);
}

#[test]
fn test_sanitize_repairs_edge_zone() {
    let mut settings = Settings::default();
    settings.zones = vec![ZoneConfig::edge(
        Edge::Left,
        -4,
        ZoneSpan::Percent {
            height_percent: 250.0,
        },
    )];
    settings.engine.acceleration_exponent = f64::NAN;
    settings.engine.dead_zone_px = -3;

    let settings = settings.sanitized();
    assert_eq!(
        settings.zones[0].kind,
        ZoneKind::Edge {
            edge: Edge::Left,
            thickness: 1,
            span: ZoneSpan::Percent {
                height_percent: 100.0
            },
        }
    );
    assert!(settings.engine.acceleration_exponent.is_finite());
    assert_eq!(settings.engine.dead_zone_px, 0);
}

#[test]
fn test_sections_default_independently() {
    let settings =
        Settings::from_json(r#"{"wheel_block": {"mode": "global"}, "edit": {}}"#).unwrap();
    assert_eq!(settings.wheel_block.mode, WheelBlockMode::Global);
    assert_eq!(settings.wheel_block.bypass_modifier, BypassModifier::Alt);
    assert!(!settings.wheel_block.engaged);
    assert_eq!(settings.edit.behavior, EditBehavior::SuspendHitTesting);
    assert_eq!(settings.hotkeys.toggle_edit, "Ctrl+Alt+E");
}

#[test]
fn test_bypass_modifier_matching() {
    let ctrl = Modifiers {
        control: true,
        ..Modifiers::default()
    };
    assert!(BypassModifier::Control.is_held(&ctrl));
    assert!(!BypassModifier::Alt.is_held(&ctrl));
    assert!(!BypassModifier::None.is_held(&ctrl));
}

#[test]
fn test_extreme_floating_origin_is_bounded() {
    let settings = Settings::from_json(
        r#"{"zones": [{"kind": "floating", "x": 2147483600, "y": -2147483600,
                       "width": 2147483647, "height": 10}]}"#,
    )
    .unwrap();
    assert_eq!(
        settings.zones[0].kind,
        ZoneKind::Floating {
            x: SCREEN_COORD_LIMIT,
            y: -SCREEN_COORD_LIMIT,
            width: SCREEN_COORD_LIMIT,
            height: MIN_ZONE_SIZE,
        }
    );

    let zones = ZoneGeometryResolver::resolve_all(&settings, &StaticDisplay::single(1920, 1080));
    assert_eq!(
        zones[0].rect,
        Rect::new(
            SCREEN_COORD_LIMIT,
            -SCREEN_COORD_LIMIT,
            2 * SCREEN_COORD_LIMIT,
            -SCREEN_COORD_LIMIT + MIN_ZONE_SIZE
        )
    );
}

#[test]
fn test_extreme_edge_extents_are_bounded() {
    let settings = Settings::from_json(
        r#"{"zones": [{"kind": "edge", "edge": "top", "thickness": 2147483647,
                       "height": 2147483647}]}"#,
    )
    .unwrap();
    let ZoneKind::Edge {
        thickness, span, ..
    } = &settings.zones[0].kind
    else {
        panic!("expected an edge zone");
    };
    assert_eq!(*thickness, SCREEN_COORD_LIMIT);
    assert_eq!(
        *span,
        ZoneSpan::Fixed {
            height: SCREEN_COORD_LIMIT
        }
    );
}

#[test]
fn test_tick_and_scroll_amount_have_upper_bounds() {
    let settings = Settings::from_json(
        r#"{"engine": {"tick_ms": 20000000000000000},
            "scroll": {"scroll_amount_px": 2000000000}}"#,
    )
    .unwrap();
    assert_eq!(settings.engine.tick_ms, MAX_TICK_MS);
    assert_eq!(settings.scroll.scroll_amount_px, MAX_SCROLL_AMOUNT_PX);
}
