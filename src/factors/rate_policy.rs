// =============================================================================
// Rate Policy Factor
// =============================================================================
//
//   rate_gap = (terminal - current) * sensitivity[ccy]
//   tone     = clamp((hawkish - dovish) * 0.1, -1, 1)
//   score    = 0.8 * rate_gap + 0.2 * tone

use crate::factors::tables::rate_sensitivity;
use crate::types::RatePolicyInput;

const RATE_GAP_WEIGHT: f64 = 0.8;
const TONE_WEIGHT: f64 = 0.2;
const TONE_PER_MENTION: f64 = 0.1;

/// Expected path of the policy rate scaled by the currency's sensitivity.
pub fn rate_gap(input: &RatePolicyInput) -> f64 {
    (input.terminal_rate - input.current_rate) * rate_sensitivity(&input.currency_code)
}

/// Net hawkish tone of central bank communication, in `[-1, 1]`.
pub fn tone(input: &RatePolicyInput) -> f64 {
    let net = f64::from(input.hawkish_mentions) - f64::from(input.dovish_mentions);
    (net * TONE_PER_MENTION).clamp(-1.0, 1.0)
}

pub fn rate_policy_score(input: &RatePolicyInput) -> f64 {
    RATE_GAP_WEIGHT * rate_gap(input) + TONE_WEIGHT * tone(input)
}
