//! Welch's moving average for locating the end of the warm-up period.

/// Smooth `values` with half-width `w`.
///
/// Produces `values.len() - w` points (none if `w` exceeds the length).
/// Point `i` is the mean of `values[i - h ..= i + h]` with `h = min(w, i)`:
/// the window narrows towards the left edge, and the last `w` inputs only
/// ever appear inside windows, never as centres.
pub fn welch(values: &[f64], w: usize) -> Vec<f64> {
    let n = values.len().saturating_sub(w);
    (0..n)
        .map(|i| {
            let h = w.min(i);
            mean(&values[i - h..=i + h])
        })
        .collect()
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}
