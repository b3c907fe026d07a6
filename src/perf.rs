//! Hook latency instrumentation.
//!
//! The input hook and the tick callback run inside the system-wide input
//! pipeline, so any stall there delays every input event on the machine.
//! This module keeps rolling per-callback statistics and warns when a
//! callback blows its budget.
//!
//! ## Usage
//!
//! Enable scope tracing with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! scrollnice = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn handle_tick(&mut self) {
//!     profile_scope!("handle_tick");
//!     // ... work ...
//! }
//! ```

use crate::constants::{HOOK_BUDGET_MS, HOOK_STATS_SAMPLES};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, warn};
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Hook Callback Statistics
// ============================================================================

/// Callback kinds whose latency is tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    PointerMove,
    Button,
    Wheel,
    Tick,
}

impl HookKind {
    pub const ALL: [HookKind; 4] = [Self::PointerMove, Self::Button, Self::Wheel, Self::Tick];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerMove => "pointer_move",
            Self::Button => "button",
            Self::Wheel => "wheel",
            Self::Tick => "tick",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Self::PointerMove => 0,
            Self::Button => 1,
            Self::Wheel => 2,
            Self::Tick => 3,
        }
    }
}

/// Rolling statistics for one operation.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    max_ms: f64,
    sum_ms: f64,
    over_budget: u64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(HOOK_STATS_SAMPLES),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
            over_budget: 0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= HOOK_STATS_SAMPLES {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
        if ms > HOOK_BUDGET_MS {
            self.over_budget += 1;
        }
    }

    /// Average over the recent window.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over the recent window.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }
}

/// Latency statistics for every hook callback kind.
#[derive(Debug, Clone, Default)]
pub struct HookStats {
    stats: [OperationStats; 4],
}

impl HookStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one callback's duration, warning when it exceeds the budget.
    pub fn record(&mut self, kind: HookKind, elapsed_ms: f64) {
        self.stats[kind.slot()].record(elapsed_ms);
        if elapsed_ms > HOOK_BUDGET_MS {
            warn!(
                callback = kind.as_str(),
                elapsed_ms = format!("{:.3}", elapsed_ms),
                budget_ms = HOOK_BUDGET_MS,
                "Hook callback over budget"
            );
        }
    }

    pub fn get(&self, kind: HookKind) -> &OperationStats {
        &self.stats[kind.slot()]
    }

    pub fn log_summary(&self) {
        for kind in HookKind::ALL {
            let stats = self.get(kind);
            if stats.count() == 0 {
                continue;
            }
            debug!(
                callback = kind.as_str(),
                count = stats.count(),
                avg_ms = format!("{:.3}", stats.average()),
                p95_ms = format!("{:.3}", stats.p95()),
                max_ms = format!("{:.3}", stats.max()),
                over_budget = stats.over_budget(),
                "Hook latency"
            );
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with the hook budget as threshold.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, HOOK_BUDGET_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        if elapsed_ms > self.threshold_ms {
            trace!("[PERF] {}: {:.3}ms", self.name, elapsed_ms);
        }

        #[cfg(not(feature = "profiling"))]
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.3}", elapsed_ms),
                threshold_ms = format!("{:.3}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
