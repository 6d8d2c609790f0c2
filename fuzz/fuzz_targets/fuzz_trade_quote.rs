//! Fuzz target: quoting against arbitrary reserve snapshots
//!
//! Constructs curve states and trade requests from structured fuzz input
//! and verifies:
//! 1. quote() never panics, whatever the reserves
//! 2. accepted quotes preserve the core invariants (product, inventory)
//! 3. quoting is deterministic (same input → same quote)
//!
//! Run: cargo +nightly fuzz run fuzz_trade_quote

#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use fairlaunch_core::{CurveState, PricingEngine, TradeDirection, TradeRequest};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
    real_sol_reserves: u64,
    real_token_reserves: u64,
    token_total_supply: u64,
    complete: bool,
    is_buy: bool,
    input_amount: u64,
    slippage_bps: u64,
}

fuzz_target!(|input: FuzzInput| {
    let state = CurveState {
        virtual_sol_reserves: input.virtual_sol_reserves,
        virtual_token_reserves: input.virtual_token_reserves,
        real_sol_reserves: input.real_sol_reserves,
        real_token_reserves: input.real_token_reserves,
        token_total_supply: input.token_total_supply,
        complete: input.complete,
    };
    let request = TradeRequest {
        direction: if input.is_buy {
            TradeDirection::Buy
        } else {
            TradeDirection::Sell
        },
        input_amount: input.input_amount,
        slippage_bps: input.slippage_bps,
    };

    let engine = PricingEngine::with_defaults();

    // Must not panic on any state, however inconsistent.
    let first = engine.quote(&state, &request);
    let second = engine.quote(&state, &request);
    assert_eq!(first, second, "quote must be deterministic");

    if let Ok(quote) = first {
        let next = quote.resulting_state;
        assert!(quote.output_amount > 0);
        assert!(quote.minimum_output_amount <= quote.output_amount);
        assert!(next.product() <= state.product(), "product grew");
        match request.direction {
            TradeDirection::Buy => {
                assert!(quote.output_amount <= state.real_token_reserves);
                assert!(next.real_sol_reserves >= state.real_sol_reserves);
            }
            TradeDirection::Sell => {
                assert!(quote.output_amount + quote.fee_amount <= state.real_sol_reserves);
                assert!(next.real_token_reserves <= next.token_total_supply);
            }
        }
    }
});
