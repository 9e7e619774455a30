//! Combat resolution.
//!
//! The resolver turns a requested action into state changes on two units and
//! an [`ActionOutcome`](crate::output::ActionOutcome) describing them. It holds
//! no battle state of its own; the only randomness comes from the random
//! source passed into each call, so a seeded source makes every outcome
//! reproducible.
//!
//! # Invariants
//!
//! - Health and stamina never go below zero
//! - A failed stamina check mutates nothing and draws nothing from the RNG
//! - Effective damage is `max(0, raw - defence)`, rounded to one decimal

mod combat;

pub use combat::CombatResolver;

/// Rounds to one decimal place.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Damage left after armor, floored at zero and rounded to one decimal.
#[must_use]
pub fn mitigate(raw: f64, defence: f64) -> f64 {
    round_tenths((raw - defence).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_tenths() {
        assert!((round_tenths(3.14159) - 3.1).abs() < 1e-9);
        assert!((round_tenths(2.96) - 3.0).abs() < 1e-9);
        assert_eq!(round_tenths(0.0), 0.0);
    }

    #[test]
    fn mitigation_never_goes_negative() {
        assert_eq!(mitigate(2.0, 5.0), 0.0);
        assert_eq!(mitigate(2.0, 2.0), 0.0);
        assert!((mitigate(5.0, 2.0) - 3.0).abs() < 1e-9);
    }
}
