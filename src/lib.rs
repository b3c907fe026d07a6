//! ScrollNice - turns pointer activity inside screen zones into synthetic
//! scroll-wheel input.
//!
//! The crate is the platform-independent core: zone geometry, hit routing,
//! the lifecycle state machine, the two scroll strategies and the
//! rate-limited injection gate. The platform layer (input hook, wheel
//! injection, timers, overlay, tray) plugs in through the traits in
//! [`platform`].

pub mod app;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod injection;
pub mod input;
pub mod perf;
pub mod platform;
pub mod router;
pub mod scroll;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod state_machine;
pub mod types;

pub use app::ScrollNice;
