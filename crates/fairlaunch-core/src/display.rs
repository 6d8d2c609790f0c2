//! Human-readable rendering of quotes, prices and progress.
//!
//! The only module that touches floating point. Pricing and settlement stay
//! in exact integers; floats here are presentation-only and never flow back
//! into the engine. Every function is infallible — a formatter that can
//! error is a formatter nobody calls from a hot path.

use crate::engine::{TradeDirection, TradeQuote};
use crate::state::{CurveState, SpotPrice};
use crate::{BPS_DENOMINATOR, LAMPORTS_PER_SOL, TOKEN_BASE_UNITS};

pub struct QuoteFormatter;

impl QuoteFormatter {
    /// Spot price in SOL per whole token. Very small prices switch to
    /// exponential notation so leading zeros do not hide the magnitude.
    pub fn format_price(price: &SpotPrice) -> String {
        if price.tokens == 0 {
            return "—".to_string();
        }
        let sol_per_token = (price.lamports as f64 / LAMPORTS_PER_SOL as f64)
            / (price.tokens as f64 / TOKEN_BASE_UNITS as f64);
        if sol_per_token > 0.0 && sol_per_token < 1e-6 {
            format!("{:.4e} SOL", sol_per_token)
        } else {
            format!("{:.9} SOL", sol_per_token)
        }
    }

    /// Whole-token amount abbreviated with K / M / B suffixes.
    pub fn format_token_amount(base_units: u64) -> String {
        let whole = base_units as f64 / TOKEN_BASE_UNITS as f64;
        if whole >= 1e9 {
            format!("{:.2}B", whole / 1e9)
        } else if whole >= 1e6 {
            format!("{:.2}M", whole / 1e6)
        } else if whole >= 1e3 {
            format!("{:.2}K", whole / 1e3)
        } else {
            format!("{:.2}", whole)
        }
    }

    pub fn format_sol(lamports: u64) -> String {
        format!("{:.9} SOL", lamports as f64 / LAMPORTS_PER_SOL as f64)
    }

    /// Graduation progress as a percentage with two decimals.
    pub fn format_progress(state: &CurveState, threshold_lamports: u64) -> String {
        let bps = state.progress_bps(threshold_lamports);
        format!("{:.2}%", bps as f64 * 100.0 / BPS_DENOMINATOR as f64)
    }

    /// Signed price impact, e.g. "+6.71%" / "-0.19%".
    pub fn format_impact(impact_bps: i64) -> String {
        format!("{:+.2}%", impact_bps as f64 * 100.0 / BPS_DENOMINATOR as f64)
    }

    /// One-line trade summary for logs and UIs.
    pub fn format_quote(quote: &TradeQuote) -> String {
        match quote.direction {
            TradeDirection::Buy => format!(
                "BUY {} for {} (fee {}, impact {}, min out {})",
                Self::format_token_amount(quote.output_amount),
                Self::format_sol(quote.input_amount),
                Self::format_sol(quote.fee_amount),
                Self::format_impact(quote.price_impact_bps),
                Self::format_token_amount(quote.minimum_output_amount),
            ),
            TradeDirection::Sell => format!(
                "SELL {} for {} (fee {}, impact {}, min out {})",
                Self::format_token_amount(quote.input_amount),
                Self::format_sol(quote.output_amount),
                Self::format_sol(quote.fee_amount),
                Self::format_impact(quote.price_impact_bps),
                Self::format_sol(quote.minimum_output_amount),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PricingEngine, TradeRequest};

    #[test]
    fn test_launch_price_uses_exponential_notation() {
        let state = CurveState::new();
        let price = state.spot_price().unwrap();
        let rendered = QuoteFormatter::format_price(&price);
        // ~2.796e-8 SOL per token at launch.
        assert!(rendered.contains('e'), "got {rendered}");
        assert!(rendered.ends_with(" SOL"));
    }

    #[test]
    fn test_large_price_uses_fixed_notation() {
        let price = SpotPrice {
            lamports: 1_000_000_000,
            tokens: 1_000_000,
        };
        assert_eq!(QuoteFormatter::format_price(&price), "1.000000000 SOL");
    }

    #[test]
    fn test_zero_token_price_renders_placeholder() {
        let price = SpotPrice {
            lamports: 1,
            tokens: 0,
        };
        assert_eq!(QuoteFormatter::format_price(&price), "—");
    }

    #[test]
    fn test_token_amount_abbreviation() {
        assert_eq!(QuoteFormatter::format_token_amount(500_000), "0.50");
        assert_eq!(QuoteFormatter::format_token_amount(1_500_000_000), "1.50K");
        assert_eq!(
            QuoteFormatter::format_token_amount(34_277_831_558_568),
            "34.28M"
        );
        assert_eq!(
            QuoteFormatter::format_token_amount(1_073_000_000_000_000),
            "1.07B"
        );
    }

    #[test]
    fn test_progress_percent() {
        let mut state = CurveState::new();
        state.real_sol_reserves = 42_500_000_000;
        assert_eq!(
            QuoteFormatter::format_progress(&state, 85_000_000_000),
            "50.00%"
        );
        state.real_sol_reserves = 170_000_000_000;
        // Clamped at 100%.
        assert_eq!(
            QuoteFormatter::format_progress(&state, 85_000_000_000),
            "100.00%"
        );
    }

    #[test]
    fn test_impact_sign() {
        assert_eq!(QuoteFormatter::format_impact(671), "+6.71%");
        assert_eq!(QuoteFormatter::format_impact(-19), "-0.19%");
        assert_eq!(QuoteFormatter::format_impact(0), "+0.00%");
    }

    #[test]
    fn test_buy_quote_summary() {
        let engine = PricingEngine::with_defaults();
        let state = CurveState::new();
        let quote = engine
            .quote(&state, &TradeRequest::buy(1_000_000_000, 500))
            .unwrap();
        let line = QuoteFormatter::format_quote(&quote);
        assert!(line.starts_with("BUY 34.28M for 1.000000000 SOL"), "got {line}");
        assert!(line.contains("+6.71%"), "got {line}");
    }
}
