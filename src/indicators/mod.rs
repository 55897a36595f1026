// =============================================================================
// Window Statistics
// =============================================================================
//
// Pure, side-effect-free helpers over the volatility window. Functions that
// can run out of data return `Option<T>` so callers handle the empty case.

pub mod percentile;
