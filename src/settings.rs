//! Persisted settings snapshot.
//!
//! Settings are stored as pretty JSON. Every section is `#[serde(default)]`
//! so partial files merge over defaults; a missing or malformed file falls
//! back to [`Settings::default`] (one right-edge zone with default tuning)
//! instead of failing. The engine only ever receives a whole, sanitized
//! snapshot.

use crate::constants::*;
use crate::error::{SettingsError, SettingsResult};
use crate::types::{Modifiers, ScrollMode, ZoneConfig, ZoneKind, ZoneSpan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Numeric parameters of the scroll strategies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    pub sensitivity: f64,
    pub dead_zone_px: i32,
    /// Exponential smoothing factor in [0, 1)
    pub smoothing: f64,
    pub acceleration_exponent: f64,
    pub tick_ms: u64,
    /// 0 disables the throttle and the injection budget
    pub max_events_per_sec: u32,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            dead_zone_px: DEFAULT_DEAD_ZONE_PX,
            smoothing: DEFAULT_SMOOTHING,
            acceleration_exponent: DEFAULT_ACCELERATION_EXPONENT,
            tick_ms: DEFAULT_TICK_MS,
            max_events_per_sec: DEFAULT_MAX_EVENTS_PER_SEC,
        }
    }
}

impl EngineTuning {
    pub fn tick_seconds(&self) -> f64 {
        self.tick_ms as f64 / 1000.0
    }
}

/// Click and hold scrolling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Mode for zones without their own override
    pub mode: ScrollMode,
    pub scroll_amount_px: i32,
    pub continuous_base_speed: f64,
    pub continuous_acceleration: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            mode: ScrollMode::Velocity,
            scroll_amount_px: DEFAULT_SCROLL_AMOUNT_PX,
            continuous_base_speed: DEFAULT_CONTINUOUS_BASE_SPEED,
            continuous_acceleration: DEFAULT_CONTINUOUS_ACCELERATION,
        }
    }
}

/// Where physical wheel events get suppressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelBlockMode {
    #[default]
    Off,
    Global,
    OutsideZoneOnly,
    InsideZoneOnly,
}

/// Modifier that lets a physical wheel event through while held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassModifier {
    None,
    #[default]
    Alt,
    Control,
    Shift,
}

impl BypassModifier {
    pub fn is_held(&self, modifiers: &Modifiers) -> bool {
        match self {
            Self::None => false,
            Self::Alt => modifiers.alt,
            Self::Control => modifiers.control,
            Self::Shift => modifiers.shift,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelBlockSettings {
    pub mode: WheelBlockMode,
    pub bypass_modifier: BypassModifier,
    /// Runtime switch flipped by the "toggle wheel" hotkey
    pub engaged: bool,
}

/// What edit mode does to hit-testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditBehavior {
    /// Pointer activity edits zones and never scrolls
    #[default]
    SuspendHitTesting,
    /// Only the overlay becomes interactive; click scrolling keeps working
    OverlayOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    pub behavior: EditBehavior,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionSettings {
    /// Ignore pointer activity while a fullscreen app has focus
    pub auto_suspend_fullscreen: bool,
}

/// Click feedback sound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// WAV file to play, empty for the built-in click
    pub click_sound: String,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            click_sound: String::new(),
        }
    }
}

/// Hotkey strings; parsing and registration live with the platform layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeySettings {
    pub toggle_enabled: String,
    pub toggle_edit: String,
    pub toggle_zone: String,
    pub toggle_wheel: String,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            toggle_enabled: "Ctrl+Alt+S".to_string(),
            toggle_edit: "Ctrl+Alt+E".to_string(),
            toggle_zone: "Ctrl+Alt+Z".to_string(),
            toggle_wheel: "Ctrl+Alt+W".to_string(),
        }
    }
}

/// Root settings snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    pub enabled: bool,
    pub zones: Vec<ZoneConfig>,
    pub scroll: ScrollSettings,
    pub engine: EngineTuning,
    pub wheel_block: WheelBlockSettings,
    pub edit: EditSettings,
    pub exclusions: ExclusionSettings,
    pub sound: SoundSettings,
    pub hotkeys: HotkeySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            enabled: true,
            zones: vec![ZoneConfig::default()],
            scroll: ScrollSettings::default(),
            engine: EngineTuning::default(),
            wheel_block: WheelBlockSettings::default(),
            edit: EditSettings::default(),
            exclusions: ExclusionSettings::default(),
            sound: SoundSettings::default(),
            hotkeys: HotkeySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("No config directory available, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Load and sanitize settings from `path`.
    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> SettingsResult<Self> {
        let settings: Settings = serde_json::from_str(content)?;
        if settings.version > SETTINGS_VERSION {
            return Err(SettingsError::Invalid(format!(
                "unsupported settings version {}",
                settings.version
            )));
        }
        Ok(settings.sanitized())
    }

    /// Save settings to `path` as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Save settings to the default location.
    pub fn save(&self) -> SettingsResult<()> {
        let path = default_settings_path().ok_or(SettingsError::NoPath)?;
        self.save_to(&path)
    }

    /// Clamp every value into its usable range.
    pub fn sanitized(mut self) -> Self {
        let engine = &mut self.engine;
        if !engine.smoothing.is_finite() {
            engine.smoothing = DEFAULT_SMOOTHING;
        }
        engine.smoothing = engine.smoothing.clamp(0.0, MAX_SMOOTHING);
        if !engine.sensitivity.is_finite() || engine.sensitivity < 0.0 {
            engine.sensitivity = DEFAULT_SENSITIVITY;
        }
        let (min_exp, max_exp) = ACCELERATION_EXPONENT_RANGE;
        if !engine.acceleration_exponent.is_finite() {
            engine.acceleration_exponent = DEFAULT_ACCELERATION_EXPONENT;
        }
        engine.acceleration_exponent = engine.acceleration_exponent.clamp(min_exp, max_exp);
        engine.dead_zone_px = engine.dead_zone_px.max(0);
        engine.tick_ms = engine.tick_ms.clamp(1, MAX_TICK_MS);

        let scroll = &mut self.scroll;
        scroll.scroll_amount_px = scroll
            .scroll_amount_px
            .clamp(MIN_SCROLL_AMOUNT_PX, MAX_SCROLL_AMOUNT_PX);
        if !scroll.continuous_base_speed.is_finite() || scroll.continuous_base_speed < 0.0 {
            scroll.continuous_base_speed = DEFAULT_CONTINUOUS_BASE_SPEED;
        }
        if !scroll.continuous_acceleration.is_finite() || scroll.continuous_acceleration < 0.0 {
            scroll.continuous_acceleration = DEFAULT_CONTINUOUS_ACCELERATION;
        }

        for zone in &mut self.zones {
            sanitize_zone(zone);
        }
        if self.zones.is_empty() {
            warn!("Settings contain no zones, using the default edge zone");
            self.zones.push(ZoneConfig::default());
        }
        self.version = SETTINGS_VERSION;
        self
    }

    /// Scroll mode that applies to `zone`.
    pub fn mode_for(&self, zone: &ZoneConfig) -> ScrollMode {
        zone.scroll_mode.unwrap_or(self.scroll.mode)
    }
}

fn sanitize_zone(zone: &mut ZoneConfig) {
    match &mut zone.kind {
        ZoneKind::Edge {
            thickness, span, ..
        } => {
            *thickness = (*thickness).clamp(MIN_EDGE_EXTENT, SCREEN_COORD_LIMIT);
            match span {
                ZoneSpan::Fixed { height } => {
                    *height = (*height).clamp(MIN_EDGE_EXTENT, SCREEN_COORD_LIMIT)
                }
                ZoneSpan::Percent { height_percent } => {
                    if !height_percent.is_finite() || *height_percent <= 0.0 {
                        *height_percent = 100.0;
                    }
                    *height_percent = height_percent.min(100.0);
                }
            }
        }
        ZoneKind::Floating {
            x,
            y,
            width,
            height,
        } => {
            *x = (*x).clamp(-SCREEN_COORD_LIMIT, SCREEN_COORD_LIMIT);
            *y = (*y).clamp(-SCREEN_COORD_LIMIT, SCREEN_COORD_LIMIT);
            *width = (*width).clamp(MIN_ZONE_SIZE, SCREEN_COORD_LIMIT);
            *height = (*height).clamp(MIN_ZONE_SIZE, SCREEN_COORD_LIMIT);
        }
    }
}

/// Default settings location: `<config dir>/scrollnice/settings.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}
