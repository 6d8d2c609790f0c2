//! Pre-trade validation.
//!
//! Runs before any pricing arithmetic and is side-effect-free: it reads the
//! `complete` flag and the request fields, nothing else, and never produces
//! a partial quote. The same invalid request against the same state always
//! yields the same error.

use crate::config::EngineConfig;
use crate::engine::{TradeDirection, TradeRequest};
use crate::state::CurveState;
use crate::{CurveError, BPS_DENOMINATOR};

pub fn check_trade(
    state: &CurveState,
    request: &TradeRequest,
    config: &EngineConfig,
) -> Result<(), CurveError> {
    if state.complete {
        return Err(CurveError::CurveComplete);
    }
    if request.input_amount == 0 {
        return Err(CurveError::InvalidAmount);
    }
    if request.slippage_bps >= BPS_DENOMINATOR {
        return Err(CurveError::InvalidSlippage);
    }
    match request.direction {
        TradeDirection::Buy => {
            if request.input_amount < config.min_buy_lamports {
                return Err(CurveError::AmountBelowMinimum);
            }
            if config.max_buy_lamports != 0 && request.input_amount > config.max_buy_lamports {
                return Err(CurveError::AmountAboveMaximum);
            }
        }
        TradeDirection::Sell => {
            if request.input_amount < config.min_sell_tokens {
                return Err(CurveError::AmountBelowMinimum);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(amount: u64) -> TradeRequest {
        TradeRequest {
            direction: TradeDirection::Buy,
            input_amount: amount,
            slippage_bps: 500,
        }
    }

    fn sell(amount: u64) -> TradeRequest {
        TradeRequest {
            direction: TradeDirection::Sell,
            input_amount: amount,
            slippage_bps: 500,
        }
    }

    #[test]
    fn test_rejects_complete_curve_first() {
        let mut state = CurveState::new();
        state.complete = true;
        let config = EngineConfig::default();
        // Even an otherwise-invalid request reports CurveComplete.
        assert_eq!(
            check_trade(&state, &buy(0), &config),
            Err(CurveError::CurveComplete)
        );
    }

    #[test]
    fn test_rejects_zero_amount() {
        let state = CurveState::new();
        let config = EngineConfig::default();
        assert_eq!(
            check_trade(&state, &buy(0), &config),
            Err(CurveError::InvalidAmount)
        );
        assert_eq!(
            check_trade(&state, &sell(0), &config),
            Err(CurveError::InvalidAmount)
        );
    }

    #[test]
    fn test_rejects_malformed_slippage() {
        let state = CurveState::new();
        let config = EngineConfig::default();
        let mut request = buy(1_000_000_000);
        request.slippage_bps = 10_000;
        assert_eq!(
            check_trade(&state, &request, &config),
            Err(CurveError::InvalidSlippage)
        );
        request.slippage_bps = 9_999;
        assert!(check_trade(&state, &request, &config).is_ok());
    }

    #[test]
    fn test_buy_size_bounds() {
        let state = CurveState::new();
        let config = EngineConfig::default();
        assert_eq!(
            check_trade(&state, &buy(9_999), &config),
            Err(CurveError::AmountBelowMinimum)
        );
        assert!(check_trade(&state, &buy(10_000), &config).is_ok());
        assert_eq!(
            check_trade(&state, &buy(10_000_000_001), &config),
            Err(CurveError::AmountAboveMaximum)
        );
        assert!(check_trade(&state, &buy(10_000_000_000), &config).is_ok());
    }

    #[test]
    fn test_buy_cap_disabled_when_zero() {
        let state = CurveState::new();
        let mut config = EngineConfig::default();
        config.max_buy_lamports = 0;
        assert!(check_trade(&state, &buy(u64::MAX), &config).is_ok());
    }

    #[test]
    fn test_sell_minimum() {
        let state = CurveState::new();
        let mut config = EngineConfig::default();
        config.min_sell_tokens = 1_000;
        assert_eq!(
            check_trade(&state, &sell(999), &config),
            Err(CurveError::AmountBelowMinimum)
        );
        assert!(check_trade(&state, &sell(1_000), &config).is_ok());
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let state = CurveState::new();
        let config = EngineConfig::default();
        let request = buy(1);
        let first = check_trade(&state, &request, &config);
        for _ in 0..10 {
            assert_eq!(check_trade(&state, &request, &config), first);
        }
    }
}
