//! Application module - the ScrollNice engine and its control surface.
//!
//! This module is organized into several submodules:
//! - `state` - The ScrollNice struct definition and sub-structs
//! - `lifecycle` - Construction, transitions, settings reload, accessors
//! - `zone_management` - Zone toggling and edit-mode zone mutation
//!
//! Input entry points live in `crate::input` as further `impl ScrollNice`
//! blocks.

mod lifecycle;
mod state;
mod zone_management;

pub use state::{EditState, ScrollNice, ScrollState, SystemState};
