//! Available-funds arithmetic and the hard cap policy.
//!
//! The ledger is pure: it receives the externally resolved `collected`
//! figure and the committed sum computed by the store, and answers how
//! much may still be drawn. The authoritative committed sum always comes
//! from the store inside the same transaction that writes (see the db
//! crate); this module never caches.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::disbursement::error::EngineError;
use crate::pool::key::PoolKey;

/// Point-in-time view of one pool's funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolSnapshot {
    /// Collected (or entitled) funds resolved from the pool's source.
    pub collected: Decimal,
    /// Sum of amounts committed by submitted/approved/paid disbursements.
    pub committed: Decimal,
    /// `collected - committed`. Negative when historical data already
    /// overcommitted the pool; tolerated, never a panic.
    pub available: Decimal,
}

/// Stateless fund-availability calculator.
pub struct PoolLedger;

impl PoolLedger {
    /// Builds a snapshot from a collected figure and a committed sum.
    #[must_use]
    pub fn snapshot(collected: Decimal, committed: Decimal) -> PoolSnapshot {
        PoolSnapshot {
            collected,
            committed,
            available: collected - committed,
        }
    }

    /// Returns true if committing `candidate` would push the pool past
    /// its cap. Committing exactly the available amount is allowed.
    #[must_use]
    pub fn would_exceed(snapshot: &PoolSnapshot, candidate: Decimal) -> bool {
        candidate > snapshot.available
    }

    /// Enforces the hard cap for a candidate commitment.
    ///
    /// # Errors
    ///
    /// Returns `FundsExceeded` carrying the pool, the requested amount,
    /// and the available funds observed at check time.
    pub fn check_capacity(
        pool: PoolKey,
        collected: Decimal,
        committed: Decimal,
        candidate: Decimal,
    ) -> Result<PoolSnapshot, EngineError> {
        let snapshot = Self::snapshot(collected, committed);
        if Self::would_exceed(&snapshot, candidate) {
            return Err(EngineError::FundsExceeded {
                pool,
                requested: candidate,
                available: snapshot.available,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_snapshot_arithmetic() {
        let snap = PoolLedger::snapshot(dec!(1_000_000), dec!(700_000));
        assert_eq!(snap.available, dec!(300_000));
    }

    #[test]
    fn test_negative_available_is_tolerated() {
        let snap = PoolLedger::snapshot(dec!(100), dec!(250));
        assert_eq!(snap.available, dec!(-150));
        assert!(PoolLedger::would_exceed(&snap, dec!(1)));
    }

    #[test]
    fn test_exact_fit_is_allowed() {
        let snap = PoolLedger::snapshot(dec!(1_000_000), dec!(700_000));
        assert!(!PoolLedger::would_exceed(&snap, dec!(300_000)));
        assert!(PoolLedger::would_exceed(&snap, dec!(300_001)));
    }

    #[test]
    fn test_check_capacity_passes_within_cap() {
        let pool = PoolKey::campaign(Uuid::nil());
        let snap = PoolLedger::check_capacity(pool, dec!(1_000_000), dec!(0), dec!(700_000))
            .expect("within cap");
        assert_eq!(snap.available, dec!(1_000_000));
    }

    #[test]
    fn test_check_capacity_rejects_over_cap() {
        let pool = PoolKey::campaign(Uuid::nil());
        let err = PoolLedger::check_capacity(pool, dec!(1_000_000), dec!(700_000), dec!(400_000))
            .unwrap_err();
        match err {
            EngineError::FundsExceeded {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, dec!(400_000));
                assert_eq!(available, dec!(300_000));
            }
            other => panic!("expected FundsExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_campaign_scenario_sequence() {
        let pool = PoolKey::campaign(Uuid::nil());
        let collected = dec!(1_000_000);

        // First submission takes 700,000.
        PoolLedger::check_capacity(pool, collected, dec!(0), dec!(700_000)).expect("700k fits");

        // 400,000 no longer fits.
        assert!(PoolLedger::check_capacity(pool, collected, dec!(700_000), dec!(400_000)).is_err());

        // Lowered to 300,000 it fits exactly and drains the pool.
        let snap = PoolLedger::check_capacity(pool, collected, dec!(700_000), dec!(300_000))
            .expect("300k fits");
        assert_eq!(snap.available - dec!(300_000), dec!(0));
    }
}
