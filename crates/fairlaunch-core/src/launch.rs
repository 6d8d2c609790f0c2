//! Launch registry: owned curve state, trader positions, and the
//! quote/commit cycle.
//!
//! The engine is pure; this module is where state actually lives. Commits
//! use optimistic concurrency: a quote carries the digest of the snapshot
//! it was priced against, and a commit against a curve that has moved since
//! is rejected as stale. The caller re-quotes against the fresh state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::{PricingEngine, TradeDirection, TradeQuote, TradeRequest};
use crate::events::{GraduationEvent, TradeEvent};
use crate::graduation::CurvePhase;
use crate::state::CurveState;
use crate::CurveError;

/// One trader's running position in one launch. Cost basis is tracked as
/// total lamports in versus out; PnL is realized on sells only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderPosition {
    pub token_balance: u64,
    /// Lamports spent on buys, fees included.
    pub total_sol_spent: u64,
    /// Net lamports received from sells.
    pub total_sol_received: u64,
    pub buy_count: u64,
    pub sell_count: u64,
}

impl TraderPosition {
    /// Realized PnL in lamports: proceeds minus spend. Negative while the
    /// position is still mostly open.
    pub fn realized_pnl_lamports(&self) -> i64 {
        self.total_sol_received as i64 - self.total_sol_spent as i64
    }

    fn apply(&mut self, quote: &TradeQuote) -> Result<(), String> {
        match quote.direction {
            TradeDirection::Buy => {
                self.token_balance = self
                    .token_balance
                    .checked_add(quote.output_amount)
                    .ok_or("position token balance overflow")?;
                self.total_sol_spent = self
                    .total_sol_spent
                    .checked_add(quote.input_amount)
                    .ok_or("position spend overflow")?;
                self.buy_count += 1;
            }
            TradeDirection::Sell => {
                self.token_balance = self
                    .token_balance
                    .checked_sub(quote.input_amount)
                    .ok_or("sell exceeds trader token balance")?;
                self.total_sol_received = self
                    .total_sol_received
                    .checked_add(quote.output_amount)
                    .ok_or("position proceeds overflow")?;
                self.sell_count += 1;
            }
        }
        Ok(())
    }
}

/// A token launch: immutable metadata plus the live curve and per-trader
/// positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLaunch {
    pub token_id: String,
    pub name: String,
    pub symbol: String,
    pub creator: String,
    /// Unix seconds, supplied by the caller at creation.
    pub created_at: u64,
    pub state: CurveState,
    pub positions: BTreeMap<String, TraderPosition>,
    pub trade_count: u64,
    pub total_fees_lamports: u64,
}

impl TokenLaunch {
    pub fn phase(&self) -> CurvePhase {
        CurvePhase::of(&self.state)
    }

    pub fn position(&self, trader: &str) -> Option<&TraderPosition> {
        self.positions.get(trader)
    }
}

/// In-process registry of launches sharing one pricing engine.
#[derive(Debug)]
pub struct LaunchRegistry {
    engine: PricingEngine,
    launches: BTreeMap<String, TokenLaunch>,
}

impl LaunchRegistry {
    pub fn new(engine: PricingEngine) -> Self {
        LaunchRegistry {
            engine,
            launches: BTreeMap::new(),
        }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn create_launch(
        &mut self,
        token_id: &str,
        name: &str,
        symbol: &str,
        creator: &str,
        created_at: u64,
    ) -> Result<&TokenLaunch, String> {
        if token_id.is_empty() {
            return Err("token_id must not be empty".to_string());
        }
        if self.launches.contains_key(token_id) {
            return Err(format!("launch already exists: {}", token_id));
        }
        let launch = TokenLaunch {
            token_id: token_id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            creator: creator.to_string(),
            created_at,
            state: CurveState::new(),
            positions: BTreeMap::new(),
            trade_count: 0,
            total_fees_lamports: 0,
        };
        self.launches.insert(token_id.to_string(), launch);
        Ok(&self.launches[token_id])
    }

    pub fn get(&self, token_id: &str) -> Option<&TokenLaunch> {
        self.launches.get(token_id)
    }

    pub fn launch_count(&self) -> usize {
        self.launches.len()
    }

    pub fn launches(&self) -> impl Iterator<Item = &TokenLaunch> {
        self.launches.values()
    }

    /// Price a trade against the current snapshot of a launch. The returned
    /// quote is only committable while the curve has not moved.
    pub fn quote(&self, token_id: &str, request: &TradeRequest) -> Result<TradeQuote, String> {
        let launch = self
            .launches
            .get(token_id)
            .ok_or_else(|| format!("unknown launch: {}", token_id))?;
        self.engine
            .quote(&launch.state, request)
            .map_err(|e| e.to_string())
    }

    /// Commit a previously obtained quote. Fails with the stale-snapshot
    /// error if any trade landed on this curve since the quote was priced.
    pub fn commit(
        &mut self,
        token_id: &str,
        trader: &str,
        quote: &TradeQuote,
        timestamp: u64,
    ) -> Result<TradeEvent, String> {
        let launch = self
            .launches
            .get_mut(token_id)
            .ok_or_else(|| format!("unknown launch: {}", token_id))?;

        if quote.snapshot_digest != launch.state.snapshot_digest() {
            return Err(CurveError::StaleSnapshot.to_string());
        }

        // Applied to a copy first so a rejected commit leaves no trace, not
        // even an empty position entry.
        let mut position = launch.positions.get(trader).cloned().unwrap_or_default();
        position.apply(quote)?;
        launch.positions.insert(trader.to_string(), position);

        launch.state = quote.resulting_state;
        launch.trade_count += 1;
        launch.total_fees_lamports = launch
            .total_fees_lamports
            .checked_add(quote.fee_amount)
            .ok_or("fee accumulator overflow")?;

        let progress = launch
            .state
            .progress_bps(self.engine.config().graduation_threshold_lamports);
        Ok(TradeEvent::from_quote(
            token_id, trader, quote, progress, timestamp,
        ))
    }

    /// Quote and commit in one step for single-writer callers. Returns the
    /// trade event plus the graduation event when this trade crosses the
    /// threshold.
    pub fn trade(
        &mut self,
        token_id: &str,
        trader: &str,
        request: &TradeRequest,
        timestamp: u64,
    ) -> Result<(TradeEvent, Option<GraduationEvent>), String> {
        let quote = self.quote(token_id, request)?;
        let graduation = quote.graduation;
        let event = self.commit(token_id, trader, &quote, timestamp)?;
        Ok((event, graduation))
    }
}
