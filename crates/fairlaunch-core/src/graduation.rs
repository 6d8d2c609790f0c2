//! Graduation: the one-time transition from curve-priced trading to
//! external liquidity.
//!
//! ACTIVE → GRADUATED, terminal. Evaluated after every accepted trade, so a
//! trade that crosses the funding threshold flips `complete` in its own
//! resulting state — never a later one. Once complete, the validator rejects
//! every trade with `CurveComplete`; reserves are frozen forever.

use serde::{Deserialize, Serialize};

use crate::events::GraduationEvent;
use crate::state::CurveState;

/// Lifecycle phase, derived from the `complete` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurvePhase {
    Active,
    Graduated,
}

impl CurvePhase {
    pub fn of(state: &CurveState) -> Self {
        if state.complete {
            CurvePhase::Graduated
        } else {
            CurvePhase::Active
        }
    }
}

/// Threshold rule: graduate when net deposits reach the configured amount.
#[derive(Debug, Clone, Copy)]
pub struct GraduationPolicy {
    threshold_lamports: u64,
}

impl GraduationPolicy {
    pub fn new(threshold_lamports: u64) -> Self {
        GraduationPolicy { threshold_lamports }
    }

    /// Flip the curve to complete if the threshold is met. Fires at most
    /// once per curve: an already-complete state is left untouched.
    pub fn evaluate(&self, state: &mut CurveState) -> Option<GraduationEvent> {
        if state.complete {
            return None;
        }
        if state.real_sol_reserves < self.threshold_lamports {
            return None;
        }
        state.complete = true;
        Some(GraduationEvent::from_state(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_stays_active() {
        let policy = GraduationPolicy::new(85_000_000_000);
        let mut state = CurveState::new();
        state.real_sol_reserves = 84_999_999_999;
        assert!(policy.evaluate(&mut state).is_none());
        assert!(!state.complete);
        assert_eq!(CurvePhase::of(&state), CurvePhase::Active);
    }

    #[test]
    fn test_graduates_exactly_at_threshold() {
        let policy = GraduationPolicy::new(85_000_000_000);
        let mut state = CurveState::new();
        state.real_sol_reserves = 85_000_000_000;
        let event = policy.evaluate(&mut state).expect("graduation event");
        assert!(state.complete);
        assert_eq!(CurvePhase::of(&state), CurvePhase::Graduated);
        assert_eq!(event.real_sol_reserves, 85_000_000_000);
        assert_eq!(event.virtual_sol_reserves, state.virtual_sol_reserves);
        assert_eq!(event.token_total_supply, state.token_total_supply);
    }

    #[test]
    fn test_fires_exactly_once() {
        let policy = GraduationPolicy::new(85_000_000_000);
        let mut state = CurveState::new();
        state.real_sol_reserves = 90_000_000_000;
        assert!(policy.evaluate(&mut state).is_some());
        // Re-evaluating a graduated curve emits nothing and changes nothing.
        let frozen = state;
        assert!(policy.evaluate(&mut state).is_none());
        assert_eq!(state, frozen);
    }
}
