//! Point look-backs over an ordered history
//!
//! The history slice is always interpreted as "everything strictly before
//! the value being described", so `lag(history, 1)` is the last element.

use crate::{MathError, Result};

/// Value observed `k` steps before the end of `history`.
///
/// `history[len - k]`, i.e. `lag(h, 1)` is the last element and
/// `lag(h, 7)` is the seventh from the end.
pub fn lag(history: &[f64], k: usize) -> Result<f64> {
    if k == 0 {
        return Err(MathError::InvalidInput(
            "Lag must be greater than zero".to_string(),
        ));
    }

    if history.len() < k {
        return Err(MathError::InsufficientData {
            required: k,
            available: history.len(),
        });
    }

    Ok(history[history.len() - k])
}

/// Number of leading observations a feature set with these look-backs
/// cannot describe.
pub fn required_history(lags: &[usize], window: usize) -> usize {
    lags.iter().copied().chain(std::iter::once(window)).max().unwrap_or(0)
}
