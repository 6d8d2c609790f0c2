//! Canonical reserve snapshot for one bonding curve.
//!
//! Virtual reserves drive the pricing formula; real reserves track actual
//! deposits/withdrawals and exist only for progress and graduation
//! accounting. The state is a plain value: the engine never mutates a
//! caller's snapshot, it returns a new one.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::math::mul_div;
use crate::{
    CurveError, BPS_DENOMINATOR, INITIAL_REAL_TOKEN_RESERVES, INITIAL_VIRTUAL_SOL_RESERVES,
    INITIAL_VIRTUAL_TOKEN_RESERVES, TOKEN_TOTAL_SUPPLY,
};

/// Spot price as an undivided rational: lamports per token base unit.
/// Kept rational so downstream fee/impact math loses no precision; only the
/// display layer ever divides this out into a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotPrice {
    /// Numerator: virtual SOL reserves (lamports).
    pub lamports: u64,
    /// Denominator: virtual token reserves (base units), always > 0.
    pub tokens: u64,
}

impl SpotPrice {
    /// Cross-multiplied comparison; exact, no division.
    pub fn cmp_exact(&self, other: &SpotPrice) -> std::cmp::Ordering {
        let lhs = self.lamports as u128 * other.tokens as u128;
        let rhs = other.lamports as u128 * self.tokens as u128;
        lhs.cmp(&rhs)
    }
}

/// Reserve snapshot for a single launched token. One per token; advanced
/// exclusively by accepted trades and frozen at graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveState {
    /// Pricing reserves (lamports). Seeded above zero.
    pub virtual_sol_reserves: u64,
    /// Pricing reserves (token base units). Seeded above zero.
    pub virtual_token_reserves: u64,
    /// Net SOL actually deposited into the curve (lamports).
    pub real_sol_reserves: u64,
    /// Token inventory the curve can still sell (base units).
    pub real_token_reserves: u64,
    /// Fixed total supply for the life of the curve (base units).
    pub token_total_supply: u64,
    /// True once graduated. Terminal: a complete curve never trades again.
    pub complete: bool,
}

impl CurveState {
    /// Fresh curve with the configured launch seeds.
    pub fn new() -> Self {
        CurveState {
            virtual_sol_reserves: INITIAL_VIRTUAL_SOL_RESERVES,
            virtual_token_reserves: INITIAL_VIRTUAL_TOKEN_RESERVES,
            real_sol_reserves: 0,
            real_token_reserves: INITIAL_REAL_TOKEN_RESERVES,
            token_total_supply: TOKEN_TOTAL_SUPPLY,
            complete: false,
        }
    }

    /// Curve with explicit seeds, for launches that deviate from defaults.
    pub fn seeded(
        virtual_sol_reserves: u64,
        virtual_token_reserves: u64,
        real_token_reserves: u64,
        token_total_supply: u64,
    ) -> Self {
        CurveState {
            virtual_sol_reserves,
            virtual_token_reserves,
            real_sol_reserves: 0,
            real_token_reserves,
            token_total_supply,
            complete: false,
        }
    }

    /// Current marginal price as an undivided rational.
    pub fn spot_price(&self) -> Result<SpotPrice, CurveError> {
        if self.virtual_token_reserves == 0 {
            return Err(CurveError::EmptyReserves);
        }
        Ok(SpotPrice {
            lamports: self.virtual_sol_reserves,
            tokens: self.virtual_token_reserves,
        })
    }

    /// Market cap in lamports: spot price × total supply, floored.
    pub fn market_cap_lamports(&self) -> Result<u64, CurveError> {
        if self.virtual_token_reserves == 0 {
            return Err(CurveError::EmptyReserves);
        }
        let cap = mul_div(
            self.virtual_sol_reserves as u128,
            self.token_total_supply as u128,
            self.virtual_token_reserves as u128,
        )?;
        u64::try_from(cap).map_err(|_| CurveError::Overflow)
    }

    /// Funding progress toward graduation in basis points, clamped to
    /// [0, 10_000]. A zero threshold counts as already fully funded.
    pub fn progress_bps(&self, graduation_threshold_lamports: u64) -> u64 {
        if graduation_threshold_lamports == 0 {
            return BPS_DENOMINATOR;
        }
        let bps = self.real_sol_reserves as u128 * BPS_DENOMINATOR as u128
            / graduation_threshold_lamports as u128;
        bps.min(BPS_DENOMINATOR as u128) as u64
    }

    /// The curve invariant `k` in widened arithmetic.
    pub fn product(&self) -> u128 {
        self.virtual_sol_reserves as u128 * self.virtual_token_reserves as u128
    }

    /// Structural invariants: both virtual reserves strictly positive while
    /// the curve is active, real reserves within supply bounds.
    pub fn is_valid(&self) -> bool {
        if !self.complete && (self.virtual_sol_reserves == 0 || self.virtual_token_reserves == 0) {
            return false;
        }
        self.real_token_reserves <= self.token_total_supply
    }

    /// SHA3-256 over the canonical field encoding, hex-rendered.
    ///
    /// A quote is valid only against the exact snapshot it was derived from;
    /// committers compare this digest to detect stale quotes.
    pub fn snapshot_digest(&self) -> String {
        let mut hasher = Sha3_256::new();
        hasher.update(self.virtual_sol_reserves.to_le_bytes());
        hasher.update(self.virtual_token_reserves.to_le_bytes());
        hasher.update(self.real_sol_reserves.to_le_bytes());
        hasher.update(self.real_token_reserves.to_le_bytes());
        hasher.update(self.token_total_supply.to_le_bytes());
        hasher.update([self.complete as u8]);
        hex::encode(hasher.finalize())
    }
}

impl Default for CurveState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRADUATION_THRESHOLD_LAMPORTS;

    #[test]
    fn test_new_curve_seeds() {
        let state = CurveState::new();
        assert_eq!(state.virtual_sol_reserves, 30_000_000_000);
        assert_eq!(state.virtual_token_reserves, 1_073_000_000_000_000);
        assert_eq!(state.real_sol_reserves, 0);
        assert_eq!(state.real_token_reserves, 793_100_000_000_000);
        assert!(!state.complete);
        assert!(state.is_valid());
    }

    #[test]
    fn test_spot_price_is_rational() {
        let state = CurveState::new();
        let price = state.spot_price().unwrap();
        assert_eq!(price.lamports, 30_000_000_000);
        assert_eq!(price.tokens, 1_073_000_000_000_000);
    }

    #[test]
    fn test_spot_price_empty_reserves() {
        let mut state = CurveState::new();
        state.virtual_token_reserves = 0;
        assert_eq!(state.spot_price(), Err(CurveError::EmptyReserves));
        assert_eq!(state.market_cap_lamports(), Err(CurveError::EmptyReserves));
    }

    #[test]
    fn test_market_cap_at_launch() {
        let state = CurveState::new();
        // floor(30e9 * 1e15 / 1.073e15) lamports ≈ 27.96 SOL
        assert_eq!(state.market_cap_lamports().unwrap(), 27_958_993_476);
    }

    #[test]
    fn test_progress_bps_clamped() {
        let mut state = CurveState::new();
        assert_eq!(state.progress_bps(GRADUATION_THRESHOLD_LAMPORTS), 0);

        state.real_sol_reserves = 42_500_000_000; // half of 85 SOL
        assert_eq!(state.progress_bps(GRADUATION_THRESHOLD_LAMPORTS), 5_000);

        state.real_sol_reserves = 200_000_000_000; // past the threshold
        assert_eq!(state.progress_bps(GRADUATION_THRESHOLD_LAMPORTS), 10_000);
    }

    #[test]
    fn test_progress_zero_threshold_counts_as_funded() {
        let state = CurveState::new();
        assert_eq!(state.progress_bps(0), BPS_DENOMINATOR);
    }

    #[test]
    fn test_price_comparison_cross_multiplied() {
        let cheap = SpotPrice {
            lamports: 1,
            tokens: 3,
        };
        let rich = SpotPrice {
            lamports: 1,
            tokens: 2,
        };
        assert_eq!(cheap.cmp_exact(&rich), std::cmp::Ordering::Less);
        assert_eq!(rich.cmp_exact(&cheap), std::cmp::Ordering::Greater);
        assert_eq!(cheap.cmp_exact(&cheap), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_snapshot_digest_changes_with_state() {
        let a = CurveState::new();
        let mut b = a;
        assert_eq!(a.snapshot_digest(), b.snapshot_digest());
        assert_eq!(a.snapshot_digest().len(), 64);

        b.real_sol_reserves += 1;
        assert_ne!(a.snapshot_digest(), b.snapshot_digest());

        let mut c = a;
        c.complete = true;
        assert_ne!(a.snapshot_digest(), c.snapshot_digest());
    }

    #[test]
    fn test_invalid_when_active_with_zero_reserves() {
        let mut state = CurveState::new();
        state.virtual_sol_reserves = 0;
        assert!(!state.is_valid());

        // A graduated curve may hold any reserve values; it is frozen.
        state.complete = true;
        assert!(state.is_valid());
    }

    #[test]
    fn test_serde_round_trip() {
        let state = CurveState::new();
        let json = serde_json::to_string(&state).unwrap();
        let back: CurveState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
