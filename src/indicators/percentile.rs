// =============================================================================
// Nearest-Rank Percentiles
// =============================================================================
//
// Percentiles over the volatility window are taken by sorting and indexing at
// `floor(p * n)`. There is no interpolation between ranks; regime fixtures
// depend on the exact element selected.

/// Number of observations the volatility window is expected to hold.
pub const WINDOW_LEN: usize = 20;

/// Return the window the percentile calculations run on.
///
/// When `window` holds fewer than [`WINDOW_LEN`] values, copies of `current`
/// are prepended until it does. The caller's slice is never touched; the
/// second element of the tuple is the number of padded observations.
pub fn padded_window(current: f64, window: &[f64]) -> (Vec<f64>, usize) {
    let missing = WINDOW_LEN.saturating_sub(window.len());
    let mut filled = Vec::with_capacity(window.len() + missing);
    filled.extend(std::iter::repeat(current).take(missing));
    filled.extend_from_slice(window);
    (filled, missing)
}

/// Sort a copy of `values` ascending. NaNs sort last.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Nearest-rank percentile of an already-sorted slice.
///
/// `fraction` is in `[0, 1]` (0.75 for the 75th percentile). The rank is
/// `floor(fraction * n)`, clamped to the last element so `fraction == 1.0`
/// stays in bounds. Returns `None` on an empty slice.
pub fn nearest_rank(sorted: &[f64], fraction: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let rank = ((fraction * n as f64).floor() as usize).min(n - 1);
    Some(sorted[rank])
}
