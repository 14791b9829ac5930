//! Trailing (causal) rolling statistics
//!
//! A trailing window never includes the value it is computed for: the mean
//! attached to day `t` is built from days `t - window ..= t - 1`.

use crate::{MathError, Result};

/// Arithmetic mean of the last `window` values of `history`.
pub fn trailing_mean(history: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    if history.len() < window {
        return Err(MathError::InsufficientData {
            required: window,
            available: history.len(),
        });
    }

    let tail = &history[history.len() - window..];
    Ok(tail.iter().sum::<f64>() / window as f64)
}
