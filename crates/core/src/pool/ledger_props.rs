//! Property-based tests for pool arithmetic and key encoding.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::disbursement::types::DisbursementCategory;
use crate::pool::key::PoolKey;
use crate::pool::ledger::PoolLedger;

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000).prop_map(Decimal::from)
}

fn arb_pool_key() -> impl Strategy<Value = PoolKey> {
    prop_oneof![
        arb_uuid().prop_map(PoolKey::campaign),
        arb_uuid().prop_map(PoolKey::zakat_period),
        arb_uuid().prop_map(|id| PoolKey::qurban_period(
            id,
            DisbursementCategory::QurbanPurchaseSapi
        )),
        arb_uuid().prop_map(|id| PoolKey::qurban_period(
            id,
            DisbursementCategory::QurbanPurchaseKambing
        )),
        arb_uuid().prop_map(|id| PoolKey::qurban_period(
            id,
            DisbursementCategory::QurbanExecutionFee
        )),
        arb_uuid().prop_map(|id| PoolKey::revenue_share(
            id,
            DisbursementCategory::RevenueShareMitra
        )),
        arb_uuid().prop_map(|id| PoolKey::revenue_share(
            id,
            DisbursementCategory::RevenueShareFundraiser
        )),
        Just(PoolKey::revenue_share_developer()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_snapshot_balances(collected in arb_amount(), committed in arb_amount()) {
        let snap = PoolLedger::snapshot(collected, committed);
        prop_assert_eq!(snap.available + snap.committed, snap.collected);
    }

    #[test]
    fn prop_cap_check_matches_arithmetic(
        collected in arb_amount(),
        committed in arb_amount(),
        candidate in arb_amount(),
    ) {
        let key = PoolKey::revenue_share_developer();
        let ok = PoolLedger::check_capacity(key, collected, committed, candidate).is_ok();
        prop_assert_eq!(ok, candidate <= collected - committed);
    }

    #[test]
    fn prop_canonical_round_trips(key in arb_pool_key()) {
        prop_assert_eq!(PoolKey::parse(&key.canonical()), Some(key));
    }

    #[test]
    fn prop_sub_pools_never_collide(period in arb_uuid()) {
        let sapi = PoolKey::qurban_period(period, DisbursementCategory::QurbanPurchaseSapi);
        let kambing = PoolKey::qurban_period(period, DisbursementCategory::QurbanPurchaseKambing);
        let fee = PoolKey::qurban_period(period, DisbursementCategory::QurbanExecutionFee);
        prop_assert_ne!(sapi.canonical(), kambing.canonical());
        prop_assert_ne!(kambing.canonical(), fee.canonical());
        prop_assert_ne!(sapi.canonical(), fee.canonical());
    }
}
