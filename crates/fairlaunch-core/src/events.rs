//! Event payloads for downstream consumers.
//!
//! The engine is pure and clock-free; events carry reserve facts only.
//! Callers that need timestamps stamp them at commit time. JSON rendering
//! never fails a trade: a serialization problem degrades to an empty object.

use serde::{Deserialize, Serialize};

use crate::engine::{TradeDirection, TradeQuote};
use crate::state::CurveState;

/// Emitted once per curve when it crosses the graduation threshold.
/// Carries the final reserve snapshot for the migration collaborator that
/// seeds the external liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduationEvent {
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub token_total_supply: u64,
}

impl GraduationEvent {
    pub fn from_state(state: &CurveState) -> Self {
        GraduationEvent {
            virtual_sol_reserves: state.virtual_sol_reserves,
            virtual_token_reserves: state.virtual_token_reserves,
            real_sol_reserves: state.real_sol_reserves,
            real_token_reserves: state.real_token_reserves,
            token_total_supply: state.token_total_supply,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Emitted for every committed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub token_id: String,
    pub trader: String,
    pub direction: TradeDirection,
    pub input_amount: u64,
    pub output_amount: u64,
    pub fee_amount: u64,
    pub price_impact_bps: i64,
    pub virtual_sol_reserves: u64,
    pub virtual_token_reserves: u64,
    /// Funding progress after this trade, in bps of the threshold.
    pub progress_bps: u64,
    /// Caller-supplied commit time (unix seconds).
    pub timestamp: u64,
}

impl TradeEvent {
    pub fn from_quote(
        token_id: &str,
        trader: &str,
        quote: &TradeQuote,
        progress_bps: u64,
        timestamp: u64,
    ) -> Self {
        TradeEvent {
            token_id: token_id.to_string(),
            trader: trader.to_string(),
            direction: quote.direction,
            input_amount: quote.input_amount,
            output_amount: quote.output_amount,
            fee_amount: quote.fee_amount,
            price_impact_bps: quote.price_impact_bps,
            virtual_sol_reserves: quote.resulting_state.virtual_sol_reserves,
            virtual_token_reserves: quote.resulting_state.virtual_token_reserves,
            progress_bps,
            timestamp,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
