//! Buy/sell quote computation over the constant-product curve.
//!
//! One canonical implementation for both directions: the swap step itself is
//! `constant_product_step`, parameterized over which reserve receives the
//! input. The fee is taken outside the pool (always in SOL: off the input on
//! buys, off the output on sells), so the swap step preserves `k` exactly up
//! to the floor in the division. All rounding is floor — outputs owed to the
//! trader and fees owed to the protocol both truncate, which biases rounding
//! error in the protocol's favor and must be preserved for reproducibility.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::events::GraduationEvent;
use crate::graduation::GraduationPolicy;
use crate::math::Amount;
use crate::state::CurveState;
use crate::validate;
use crate::{CurveError, BPS_DENOMINATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Spend lamports, receive token base units.
    Buy,
    /// Spend token base units, receive lamports.
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub direction: TradeDirection,
    /// Strictly positive; lamports for buys, token base units for sells.
    pub input_amount: u64,
    /// Caller-declared tolerance in [0, 10000). Governs only the
    /// minimum-output floor communicated to the execution layer.
    pub slippage_bps: u64,
}

impl TradeRequest {
    pub fn buy(lamports: u64, slippage_bps: u64) -> Self {
        TradeRequest {
            direction: TradeDirection::Buy,
            input_amount: lamports,
            slippage_bps,
        }
    }

    pub fn sell(tokens: u64, slippage_bps: u64) -> Self {
        TradeRequest {
            direction: TradeDirection::Sell,
            input_amount: tokens,
            slippage_bps,
        }
    }
}

/// A priced trade against one specific snapshot. Not yet committed: the
/// resulting state is valid only if applied against the exact snapshot the
/// quote was derived from (see `snapshot_digest`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeQuote {
    pub direction: TradeDirection,
    pub input_amount: u64,
    /// Amount of the opposite asset the trade yields, after fees.
    pub output_amount: u64,
    /// Fee withheld, always in lamports (the fee asset is SOL).
    pub fee_amount: u64,
    /// Signed price movement caused by this trade: positive on buys,
    /// negative on sells.
    pub price_impact_bps: i64,
    /// Slippage-adjusted floor the execution layer must not fall below.
    pub minimum_output_amount: u64,
    /// Digest of the input snapshot this quote was derived from.
    pub snapshot_digest: String,
    /// Curve state after the trade, including any graduation flip.
    pub resulting_state: CurveState,
    /// Present when this trade crosses the graduation threshold.
    pub graduation: Option<GraduationEvent>,
}

/// Summary of an applied trade, for callers that commit immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub direction: TradeDirection,
    pub input_amount: u64,
    pub output_amount: u64,
    pub fee_amount: u64,
    pub price_impact_bps: i64,
    pub graduated: bool,
    pub resulting_digest: String,
}

/// The pricing engine: pure, synchronous, stateless between calls.
/// Construct once per configuration and share freely (read-only).
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: EngineConfig,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        PricingEngine { config }
    }

    pub fn with_defaults() -> Self {
        PricingEngine::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Price a trade against a snapshot. Rejections are typed and
    /// side-effect-free; an accepted quote carries the full resulting state.
    pub fn quote(
        &self,
        state: &CurveState,
        request: &TradeRequest,
    ) -> Result<TradeQuote, CurveError> {
        validate::check_trade(state, request, &self.config)?;

        let (output_amount, fee_amount, mut resulting) = match request.direction {
            TradeDirection::Buy => self.apply_buy(state, request.input_amount)?,
            TradeDirection::Sell => self.apply_sell(state, request.input_amount)?,
        };

        let impact = price_impact_bps(state, &resulting)?;
        if impact.unsigned_abs() > self.config.max_price_impact_bps {
            return Err(CurveError::SlippageExceeded);
        }

        let minimum_output_amount = ((output_amount as u128
            * (BPS_DENOMINATOR - request.slippage_bps) as u128)
            / BPS_DENOMINATOR as u128) as u64;

        let policy = GraduationPolicy::new(self.config.graduation_threshold_lamports);
        let graduation = policy.evaluate(&mut resulting);

        Ok(TradeQuote {
            direction: request.direction,
            input_amount: request.input_amount,
            output_amount,
            fee_amount,
            price_impact_bps: impact,
            minimum_output_amount,
            snapshot_digest: state.snapshot_digest(),
            resulting_state: resulting,
            graduation,
        })
    }

    /// Quote and apply in one step, for single-writer callers.
    pub fn execute(
        &self,
        state: &CurveState,
        request: &TradeRequest,
    ) -> Result<(CurveState, TradeReceipt), CurveError> {
        let quote = self.quote(state, request)?;
        let receipt = TradeReceipt {
            direction: quote.direction,
            input_amount: quote.input_amount,
            output_amount: quote.output_amount,
            fee_amount: quote.fee_amount,
            price_impact_bps: quote.price_impact_bps,
            graduated: quote.graduation.is_some(),
            resulting_digest: quote.resulting_state.snapshot_digest(),
        };
        Ok((quote.resulting_state, receipt))
    }

    /// Buy: fee off the SOL input, net amount into the pool.
    /// Returns (tokens out, fee lamports, resulting state).
    fn apply_buy(
        &self,
        state: &CurveState,
        lamports_in: u64,
    ) -> Result<(u64, u64, CurveState), CurveError> {
        let fee = self.config.fee_for(lamports_in);
        let net = lamports_in.checked_sub(fee).ok_or(CurveError::Underflow)?;
        if net == 0 {
            return Err(CurveError::InvalidAmount);
        }

        let (new_sol, new_tok, tokens_out) = constant_product_step(
            state.virtual_sol_reserves,
            state.virtual_token_reserves,
            net,
        )?;
        if tokens_out == 0 || new_tok == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }
        // Inventory bound: the curve cannot hand out tokens it does not
        // hold. Callers retry with a smaller amount near exhaustion.
        if tokens_out > state.real_token_reserves {
            return Err(CurveError::InsufficientLiquidity);
        }

        let mut next = *state;
        next.virtual_sol_reserves = new_sol;
        next.virtual_token_reserves = new_tok;
        next.real_sol_reserves = next
            .real_sol_reserves
            .checked_add(net)
            .ok_or(CurveError::Overflow)?;
        next.real_token_reserves -= tokens_out;
        Ok((tokens_out, fee, next))
    }

    /// Sell: full input into the pool, fee off the gross SOL output.
    /// Returns (net lamports out, fee lamports, resulting state).
    fn apply_sell(
        &self,
        state: &CurveState,
        tokens_in: u64,
    ) -> Result<(u64, u64, CurveState), CurveError> {
        let (new_tok, new_sol, gross_out) = constant_product_step(
            state.virtual_token_reserves,
            state.virtual_sol_reserves,
            tokens_in,
        )?;
        if gross_out == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }
        // The payout is backed by real deposits, never by virtual seed SOL.
        if gross_out > state.real_sol_reserves {
            return Err(CurveError::InsufficientLiquidity);
        }
        // Tokens flowing back may not exceed what the curve ever issued.
        let returned_inventory = state
            .real_token_reserves
            .checked_add(tokens_in)
            .ok_or(CurveError::Overflow)?;
        if returned_inventory > state.token_total_supply {
            return Err(CurveError::InsufficientLiquidity);
        }

        let fee = self.config.fee_for(gross_out);
        let net_out = gross_out.checked_sub(fee).ok_or(CurveError::Underflow)?;
        if net_out == 0 {
            return Err(CurveError::InsufficientLiquidity);
        }

        let mut next = *state;
        next.virtual_token_reserves = new_tok;
        next.virtual_sol_reserves = new_sol;
        next.real_sol_reserves -= gross_out;
        next.real_token_reserves = returned_inventory;
        Ok((net_out, fee, next))
    }
}

/// The swap step itself: add `amount_in` to one virtual reserve, recompute
/// the other from `k`, floored. Direction-agnostic.
/// Returns (new reserve_in, new reserve_out, amount_out).
fn constant_product_step(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
) -> Result<(u64, u64, u64), CurveError> {
    let k = Amount::from(reserve_in).mul(Amount::from(reserve_out))?;
    let new_in = Amount::from(reserve_in).add(Amount::from(amount_in))?;
    let new_out = k.div_floor(new_in)?;
    let out = Amount::from(reserve_out).sub(new_out)?;
    Ok((new_in.to_u64()?, new_out.to_u64()?, out.to_u64()?))
}

/// Signed price impact in bps, cross-multiplied so the rationals are never
/// divided out: ((s'/t') - (s/t)) / (s/t) = (s'·t - s·t') / (s·t').
/// Rounded half-away-from-zero, matching the original's display convention.
fn price_impact_bps(before: &CurveState, after: &CurveState) -> Result<i64, CurveError> {
    let s0 = before.virtual_sol_reserves as i128;
    let t0 = before.virtual_token_reserves as i128;
    let s1 = after.virtual_sol_reserves as i128;
    let t1 = after.virtual_token_reserves as i128;

    let lhs = s1.checked_mul(t0).ok_or(CurveError::Overflow)?;
    let rhs = s0.checked_mul(t1).ok_or(CurveError::Overflow)?;
    let den = rhs;
    if den == 0 {
        return Err(CurveError::DivisionByZero);
    }
    let num = lhs
        .checked_sub(rhs)
        .and_then(|d| d.checked_mul(BPS_DENOMINATOR as i128))
        .ok_or(CurveError::Overflow)?;

    let rounded = if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    };
    i64::try_from(rounded).map_err(|_| CurveError::Overflow)
}
