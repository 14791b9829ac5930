//! Growth and ratio calculations with a guarded baseline

/// Percentage change from `baseline` to `current`.
///
/// Returns `NaN` when the baseline is zero (or not finite) instead of an
/// infinite or panicking result; callers report that as "undefined".
pub fn percent_change(baseline: f64, current: f64) -> f64 {
    if baseline == 0.0 || !baseline.is_finite() {
        return f64::NAN;
    }

    (current - baseline) / baseline * 100.0
}

/// Sum of the last `window` values (or all of them when shorter).
pub fn tail_total(values: &[f64], window: usize) -> f64 {
    let start = values.len().saturating_sub(window);
    values[start..].iter().sum()
}
