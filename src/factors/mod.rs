// =============================================================================
// Factor Scorers
// =============================================================================
//
// Pure functions mapping one input category to a factor score, roughly in
// [-1, 1]. The real interest edge is an unbounded multiplier.
//
// All per-currency constants live in `tables`.

pub mod growth;
pub mod positioning;
pub mod rate_policy;
pub mod real_rate;
pub mod risk_appetite;
pub mod tables;

pub use growth::growth_momentum_score;
pub use positioning::positioning_score;
pub use rate_policy::rate_policy_score;
pub use real_rate::real_interest_edge_score;
pub use risk_appetite::{risk_appetite_components, risk_appetite_score, RiskAppetiteComponents};
