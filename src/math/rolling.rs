//! Fixed-window running statistics.
//!
//! ```text
//! mean_i = (x_{i-w+1} + ... + x_i) / w      for i >= w - 1
//! ```
//!
//! Positions before the window fills have no value (`None`). Missing is kept
//! distinct from zero so callers can render gaps rather than a fake dip.

/// Trailing arithmetic mean over `window` consecutive values.
///
/// The output has the same length as `values`. A `window` of 0 yields all `None`.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}
