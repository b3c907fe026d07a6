//! Unit tests for perf module.

use scrollnice::perf::{HookKind, HookStats, OperationStats, ScopedTimer, measure};

#[test]
fn test_scoped_timer_creation() {
    // High threshold, so dropping it logs nothing
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_profile_scope_macro_compiles_away() {
    scrollnice::profile_scope!("unit_scope");
    scrollnice::profile_scope!("unit_scope_threshold", 5.0);
}

#[test]
fn test_empty_stats_are_zero() {
    let stats = OperationStats::default();
    assert_eq!(stats.average(), 0.0);
    assert_eq!(stats.max(), 0.0);
    assert_eq!(stats.count(), 0);
}

#[test]
fn test_over_budget_counts_per_kind() {
    let mut hooks = HookStats::new();
    hooks.record(HookKind::PointerMove, 0.05);
    hooks.record(HookKind::PointerMove, 3.0);
    hooks.record(HookKind::Button, 2.5);

    assert_eq!(hooks.get(HookKind::PointerMove).over_budget(), 1);
    assert_eq!(hooks.get(HookKind::Button).over_budget(), 1);
    assert_eq!(hooks.get(HookKind::PointerMove).max(), 3.0);
    hooks.log_summary();
}

#[test]
fn test_hook_kind_names_are_unique() {
    let mut names: Vec<&str> = HookKind::ALL.iter().map(|k| k.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), HookKind::ALL.len());
}

#[test]
fn test_measure_times_closure() {
    let (sum, elapsed_ms) = measure(|| (1..=100).sum::<u32>());
    assert_eq!(sum, 5050);
    assert!(elapsed_ms >= 0.0);
}
