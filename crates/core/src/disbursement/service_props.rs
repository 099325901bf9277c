//! Property-based tests for the transition state machine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::disbursement::error::EngineError;
use crate::disbursement::service::TransitionEngine;
use crate::disbursement::types::{DisbursementStatus, PaymentDetails};

fn arb_status() -> impl Strategy<Value = DisbursementStatus> {
    prop_oneof![
        Just(DisbursementStatus::Draft),
        Just(DisbursementStatus::Submitted),
        Just(DisbursementStatus::Approved),
        Just(DisbursementStatus::Rejected),
        Just(DisbursementStatus::Paid),
    ]
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_payment() -> impl Strategy<Value = PaymentDetails> {
    (1i64..1_000_000_000, 0i64..1_000_000, any::<u128>()).prop_map(
        |(amount, fees, bank)| PaymentDetails {
            transferred_amount: Decimal::from(amount),
            additional_fees: Decimal::from(fees),
            transfer_date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            transfer_proof_url: "https://files.example.org/proof.jpg".to_string(),
            destination_bank_id: Uuid::from_u128(bank | 1),
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_submit_only_from_draft(status in arb_status(), actor in arb_uuid()) {
        let result = TransitionEngine::submit(status, actor);
        prop_assert_eq!(result.is_ok(), status == DisbursementStatus::Draft);
    }

    #[test]
    fn prop_approve_only_from_submitted(status in arb_status(), actor in arb_uuid()) {
        let result = TransitionEngine::approve(status, actor);
        prop_assert_eq!(result.is_ok(), status == DisbursementStatus::Submitted);
    }

    #[test]
    fn prop_pay_only_from_approved(
        status in arb_status(),
        actor in arb_uuid(),
        details in arb_payment(),
    ) {
        let result = TransitionEngine::pay(status, actor, details);
        prop_assert_eq!(result.is_ok(), status == DisbursementStatus::Approved);
    }

    #[test]
    fn prop_terminal_states_accept_nothing(actor in arb_uuid(), details in arb_payment()) {
        for status in [DisbursementStatus::Rejected, DisbursementStatus::Paid] {
            prop_assert!(TransitionEngine::submit(status, actor).is_err());
            prop_assert!(TransitionEngine::approve(status, actor).is_err());
            prop_assert!(
                TransitionEngine::reject(status, "duplicate request".to_string()).is_err()
            );
            prop_assert!(TransitionEngine::pay(status, actor, details.clone()).is_err());
        }
    }

    #[test]
    fn prop_transitions_agree_with_matrix(status in arb_status(), actor in arb_uuid()) {
        prop_assert_eq!(
            TransitionEngine::submit(status, actor).is_ok(),
            TransitionEngine::is_valid_transition(status, DisbursementStatus::Submitted)
        );
        prop_assert_eq!(
            TransitionEngine::approve(status, actor).is_ok(),
            TransitionEngine::is_valid_transition(status, DisbursementStatus::Approved)
        );
        prop_assert_eq!(
            TransitionEngine::reject(status, "over budget".to_string()).is_ok(),
            TransitionEngine::is_valid_transition(status, DisbursementStatus::Rejected)
        );
    }

    #[test]
    fn prop_delete_matches_status_predicate(status in arb_status()) {
        prop_assert_eq!(TransitionEngine::delete(status).is_ok(), status.is_deletable());
    }

    #[test]
    fn prop_resubmit_only_from_rejected(status in arb_status(), actor in arb_uuid()) {
        let result = TransitionEngine::resubmit(status, actor);
        prop_assert_eq!(result.is_ok(), status == DisbursementStatus::Rejected);
        if let Ok(action) = result {
            prop_assert_eq!(action.new_status(), DisbursementStatus::Draft);
        }
    }

    #[test]
    fn prop_reject_always_requires_reason(status in arb_status(), blank in "[ \t]{0,8}") {
        let result = TransitionEngine::reject(status, blank);
        prop_assert!(matches!(result, Err(EngineError::RejectionReasonRequired)));
    }
}
