// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FAIRLAUNCH - CORE MODULE
//
// Bonding-curve trading engine for fair-launch token price discovery.
// Computes buy/sell quotes over a constant-product curve (x·y=k), tracks
// reserve state, and decides graduation to external liquidity.
// All settlement arithmetic uses widened u128 integer math (no floating-point).
// The engine is a pure function over a reserve snapshot: no I/O, no clocks,
// no internal concurrency. Callers serialize commits per curve.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod config;
pub mod display;
pub mod engine;
pub mod events;
pub mod graduation;
pub mod launch;
pub mod math;
pub mod state;
pub mod validate;

pub use config::EngineConfig;
pub use display::QuoteFormatter;
pub use engine::{PricingEngine, TradeDirection, TradeQuote, TradeReceipt, TradeRequest};
pub use events::{GraduationEvent, TradeEvent};
pub use graduation::{CurvePhase, GraduationPolicy};
pub use launch::{LaunchRegistry, TokenLaunch, TraderPosition};
pub use math::{mul_div, Amount};
pub use state::{CurveState, SpotPrice};

/// 1 SOL = 1_000_000_000 lamports.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Launched tokens use 6 decimals; 1 token = 1_000_000 base units.
pub const TOKEN_DECIMALS: u32 = 6;

/// Base units per whole token (10^TOKEN_DECIMALS).
pub const TOKEN_BASE_UNITS: u64 = 1_000_000;

/// Basis point denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seed virtual token reserves: 1.073B tokens in base units.
/// Virtual reserves are accounting quantities only — seeded above zero so the
/// price is defined before any real deposit occurs.
pub const INITIAL_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000 * TOKEN_BASE_UNITS;

/// Seed virtual SOL reserves: 30 SOL in lamports.
pub const INITIAL_VIRTUAL_SOL_RESERVES: u64 = 30 * LAMPORTS_PER_SOL;

/// Real token inventory the curve can sell: 793.1M tokens in base units.
/// Chosen so the inventory exhausts just past the graduation threshold —
/// with 30 SOL / 1.073B seeds, selling the full 793.1M draws in ~85.005 SOL.
pub const INITIAL_REAL_TOKEN_RESERVES: u64 = 793_100_000 * TOKEN_BASE_UNITS;

/// Fixed total supply per launched token: 1B tokens in base units.
/// The remainder above the curve inventory is reserved for the liquidity
/// migration after graduation.
pub const TOKEN_TOTAL_SUPPLY: u64 = 1_000_000_000 * TOKEN_BASE_UNITS;

/// Net deposits (lamports) at which a curve graduates: 85 SOL.
pub const GRADUATION_THRESHOLD_LAMPORTS: u64 = 85 * LAMPORTS_PER_SOL;

/// Default trade fee: 1/100 = 1%. Always charged in SOL, outside the pool.
pub const DEFAULT_FEE_NUMERATOR: u64 = 1;
pub const DEFAULT_FEE_DENOMINATOR: u64 = 100;

/// Protocol circuit breaker: quotes whose price impact exceeds this are
/// rejected regardless of the caller's declared slippage tolerance.
pub const MAX_PRICE_IMPACT_BPS: u64 = 1_500;

/// Minimum buy: 0.00001 SOL. Anti-dust, not anti-user.
pub const MIN_BUY_LAMPORTS: u64 = 10_000;

/// Maximum buy per trade: 10 SOL. 0 disables the cap.
pub const MAX_BUY_LAMPORTS: u64 = 10 * LAMPORTS_PER_SOL;

/// Minimum sell: 1 token base unit.
pub const MIN_SELL_TOKENS: u64 = 1;

/// Typed failure of a quote or commit. Every variant is local and
/// non-retryable as given: the caller may retry with different parameters,
/// the engine never retries internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    /// Input amount is zero.
    InvalidAmount,
    /// Input amount below the configured minimum trade size.
    AmountBelowMinimum,
    /// Input amount above the configured maximum trade size.
    AmountAboveMaximum,
    /// Caller slippage tolerance outside [0, 10000) bps.
    InvalidSlippage,
    /// Trade would produce zero output or exceed the real reserve inventory.
    InsufficientLiquidity,
    /// Price impact above the protocol ceiling.
    SlippageExceeded,
    /// Curve has graduated; it no longer trades through this engine.
    CurveComplete,
    /// Virtual token reserves are zero; no price is defined.
    EmptyReserves,
    /// Arithmetic overflow.
    Overflow,
    /// Subtraction would go negative.
    Underflow,
    /// Division by zero.
    DivisionByZero,
    /// Quote was derived from a snapshot that is no longer the live state.
    StaleSnapshot,
}

impl std::fmt::Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CurveError::InvalidAmount => write!(f, "Invalid trade amount"),
            CurveError::AmountBelowMinimum => write!(f, "Amount below minimum trade size"),
            CurveError::AmountAboveMaximum => write!(f, "Amount above maximum trade size"),
            CurveError::InvalidSlippage => write!(f, "Slippage tolerance out of range"),
            CurveError::InsufficientLiquidity => write!(f, "Insufficient liquidity"),
            CurveError::SlippageExceeded => write!(f, "Price impact exceeds protocol ceiling"),
            CurveError::CurveComplete => write!(f, "Bonding curve is complete"),
            CurveError::EmptyReserves => write!(f, "Curve has empty reserves"),
            CurveError::Overflow => write!(f, "Arithmetic overflow"),
            CurveError::Underflow => write!(f, "Arithmetic underflow"),
            CurveError::DivisionByZero => write!(f, "Division by zero"),
            CurveError::StaleSnapshot => write!(f, "Quote derived from a stale snapshot"),
        }
    }
}

impl std::error::Error for CurveError {}
