//! Engine configuration.
//!
//! Every protocol constant is injected here — fees, graduation threshold,
//! impact ceiling, trade-size bounds. There is no process-wide state; two
//! engines with different configs can run side by side in one process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{
    BPS_DENOMINATOR, DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR,
    GRADUATION_THRESHOLD_LAMPORTS, MAX_BUY_LAMPORTS, MAX_PRICE_IMPACT_BPS, MIN_BUY_LAMPORTS,
    MIN_SELL_TOKENS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trade fee as a fraction: numerator / denominator. Default 1/100 (1%).
    /// The fee asset is always SOL — off the input on buys, off the output
    /// on sells — and it is taken outside the pool.
    pub fee_numerator: u64,
    pub fee_denominator: u64,

    /// Net deposits (lamports) at which a curve graduates. Default 85 SOL.
    pub graduation_threshold_lamports: u64,

    /// Hard ceiling on per-trade price impact in bps. Default 1500 (15%).
    /// This is a protocol circuit breaker, independent of the caller's
    /// declared slippage tolerance.
    pub max_price_impact_bps: u64,

    /// Minimum buy in lamports. Default 10_000 (0.00001 SOL).
    pub min_buy_lamports: u64,

    /// Maximum buy in lamports per trade. Default 10 SOL; 0 disables.
    pub max_buy_lamports: u64,

    /// Minimum sell in token base units. Default 1.
    pub min_sell_tokens: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fee_numerator: DEFAULT_FEE_NUMERATOR,
            fee_denominator: DEFAULT_FEE_DENOMINATOR,
            graduation_threshold_lamports: GRADUATION_THRESHOLD_LAMPORTS,
            max_price_impact_bps: MAX_PRICE_IMPACT_BPS,
            min_buy_lamports: MIN_BUY_LAMPORTS,
            max_buy_lamports: MAX_BUY_LAMPORTS,
            min_sell_tokens: MIN_SELL_TOKENS,
        }
    }
}

impl EngineConfig {
    /// Reject configs that would make the engine misprice or divide by zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.fee_denominator == 0 {
            return Err("fee_denominator must be > 0".to_string());
        }
        if self.fee_numerator >= self.fee_denominator {
            return Err("fee must be < 100% of the trade".to_string());
        }
        if self.graduation_threshold_lamports == 0 {
            return Err("graduation_threshold_lamports must be > 0".to_string());
        }
        if self.max_price_impact_bps == 0 || self.max_price_impact_bps > BPS_DENOMINATOR {
            return Err(format!(
                "max_price_impact_bps must be in 1..={}",
                BPS_DENOMINATOR
            ));
        }
        if self.max_buy_lamports != 0 && self.max_buy_lamports < self.min_buy_lamports {
            return Err("max_buy_lamports below min_buy_lamports".to_string());
        }
        Ok(())
    }

    /// Load engine config from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Fee floored toward zero — rounding error always favors the protocol.
    pub fn fee_for(&self, amount: u64) -> u64 {
        ((amount as u128 * self.fee_numerator as u128) / self.fee_denominator as u128) as u64
    }
}
