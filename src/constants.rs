//! Application-wide constants.
//!
//! Centralizes ceilings, thresholds and defaults so the scroll pipeline
//! has no magic numbers scattered through it.

// ============================================================================
// Zone Geometry
// ============================================================================

/// Minimum width/height of a floating zone in pixels
pub const MIN_ZONE_SIZE: i32 = 60;

/// Minimum thickness/extent of an edge zone in pixels
pub const MIN_EDGE_EXTENT: i32 = 1;

/// Largest accepted zone coordinate or extent magnitude in pixels
pub const SCREEN_COORD_LIMIT: i32 = 32_767;

/// Screen size used when no monitor metrics are available at all
pub const FALLBACK_SCREEN_SIZE: (i32, i32) = (1920, 1080);

/// Size of the bottom-right resize handle of a floating zone in edit mode
pub const RESIZE_HANDLE_SIZE: i32 = 16;

/// Default thickness of the built-in edge zone
pub const DEFAULT_EDGE_THICKNESS: i32 = 12;

/// Default floating zone rectangle (x, y, width, height)
pub const DEFAULT_FLOATING_RECT: (i32, i32, i32, i32) = (100, 100, 120, 180);

// ============================================================================
// Velocity Curve
// ============================================================================

/// Ceiling applied to the accelerated velocity before accumulation
pub const VELOCITY_CEILING: f64 = 500.0;

/// Smoothed velocities at or below this magnitude produce no output
pub const VELOCITY_EPSILON: f64 = 0.001;

/// Accumulator size of one wheel unit
pub const VELOCITY_UNIT: f64 = 1.0;

/// Upper bound for the smoothing factor (1.0 would freeze the curve)
pub const MAX_SMOOTHING: f64 = 0.999;

/// Allowed range for the acceleration exponent
pub const ACCELERATION_EXPONENT_RANGE: (f64, f64) = (0.1, 4.0);

pub const DEFAULT_SENSITIVITY: f64 = 1.2;
pub const DEFAULT_DEAD_ZONE_PX: i32 = 2;
pub const DEFAULT_SMOOTHING: f64 = 0.85;
pub const DEFAULT_ACCELERATION_EXPONENT: f64 = 1.35;
pub const DEFAULT_TICK_MS: u64 = 10;

/// Slowest accepted velocity tick interval
pub const MAX_TICK_MS: u64 = 1000;
pub const DEFAULT_MAX_EVENTS_PER_SEC: u32 = 120;

// ============================================================================
// Click / Hold Scrolling
// ============================================================================

/// Timer interval while a hold-scroll is running
pub const HOLD_TICK_MS: u64 = 16;

/// Fraction of a second credited to each hold tick
pub const HOLD_TICK_FRACTION: f64 = 0.016;

/// Hard ceiling on the hold-scroll speed (pixels per second)
pub const HOLD_SPEED_CEILING: f64 = 200.0;

/// Accumulated pixels that trigger one hold-scroll batch
pub const HOLD_EMIT_THRESHOLD: f64 = 30.0;

/// Smallest accepted click scroll amount in pixels
pub const MIN_SCROLL_AMOUNT_PX: i32 = 10;

/// Largest accepted click scroll amount in pixels
pub const MAX_SCROLL_AMOUNT_PX: i32 = 10_000;

pub const DEFAULT_SCROLL_AMOUNT_PX: i32 = 300;
pub const DEFAULT_CONTINUOUS_BASE_SPEED: f64 = 10.0;
pub const DEFAULT_CONTINUOUS_ACCELERATION: f64 = 2.0;

// ============================================================================
// Injection
// ============================================================================

/// Platform wheel delta of one notch
pub const WHEEL_DELTA: i32 = 120;

/// Scrolled pixels that correspond to one notch
pub const PIXELS_PER_NOTCH: i32 = 100;

/// Most wheel events a single batch may emit, budget or not
pub const MAX_BATCH_EVENTS: u32 = 500;

/// Length of the injection budget window in milliseconds
pub const INJECTION_WINDOW_MS: u64 = 1000;

// ============================================================================
// Hook Latency
// ============================================================================

/// Hook callbacks slower than this are reported (system-wide input stalls)
pub const HOOK_BUDGET_MS: f64 = 1.0;

/// Number of samples kept per callback kind
pub const HOOK_STATS_SAMPLES: usize = 100;

// ============================================================================
// Settings
// ============================================================================

/// Current settings file format version
pub const SETTINGS_VERSION: u32 = 2;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "scrollnice";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
