//! Transition engine for disbursement state changes.
//!
//! This module implements the core state machine logic for moving
//! disbursements through the payout lifecycle. Authorization and fund
//! checks happen before these functions are called; this module owns
//! only the status preconditions and payload validation.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use amanah_shared::types::money;

use crate::disbursement::error::EngineError;
use crate::disbursement::types::{DisbursementStatus, PaymentDetails, TransitionAction};

/// Stateless engine for validating disbursement transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `TransitionAction`
/// with audit trail information.
pub struct TransitionEngine;

impl TransitionEngine {
    /// Submit a draft disbursement for review.
    ///
    /// The fund cap check runs separately, inside the same storage
    /// transaction that persists the returned action.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the disbursement
    /// * `submitted_by` - The actor submitting the disbursement
    ///
    /// # Returns
    /// * `Ok(TransitionAction::Submit)` if the transition is valid
    /// * `Err(EngineError::InvalidTransition)` if not in Draft status
    pub fn submit(
        current_status: DisbursementStatus,
        submitted_by: Uuid,
    ) -> Result<TransitionAction, EngineError> {
        match current_status {
            DisbursementStatus::Draft => Ok(TransitionAction::Submit {
                new_status: DisbursementStatus::Submitted,
                submitted_by,
                submitted_at: Utc::now(),
            }),
            _ => Err(EngineError::InvalidTransition {
                from: current_status,
                to: DisbursementStatus::Submitted,
            }),
        }
    }

    /// Approve a submitted disbursement.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the disbursement
    /// * `approved_by` - The actor approving the disbursement
    ///
    /// # Returns
    /// * `Ok(TransitionAction::Approve)` if the transition is valid
    /// * `Err(EngineError::InvalidTransition)` if not in Submitted status
    pub fn approve(
        current_status: DisbursementStatus,
        approved_by: Uuid,
    ) -> Result<TransitionAction, EngineError> {
        match current_status {
            DisbursementStatus::Submitted => Ok(TransitionAction::Approve {
                new_status: DisbursementStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
            }),
            _ => Err(EngineError::InvalidTransition {
                from: current_status,
                to: DisbursementStatus::Approved,
            }),
        }
    }

    /// Reject a submitted disbursement.
    ///
    /// Rejection is terminal; the committed amount is released because
    /// rejected rows no longer count against the pool.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the disbursement
    /// * `rejection_reason` - The reason for rejection (required)
    ///
    /// # Returns
    /// * `Ok(TransitionAction::Reject)` if the transition is valid
    /// * `Err(EngineError::InvalidTransition)` if not in Submitted status
    /// * `Err(EngineError::RejectionReasonRequired)` if reason is empty
    pub fn reject(
        current_status: DisbursementStatus,
        rejection_reason: String,
    ) -> Result<TransitionAction, EngineError> {
        if rejection_reason.trim().is_empty() {
            return Err(EngineError::RejectionReasonRequired);
        }

        match current_status {
            DisbursementStatus::Submitted => Ok(TransitionAction::Reject {
                new_status: DisbursementStatus::Rejected,
                rejection_reason,
            }),
            _ => Err(EngineError::InvalidTransition {
                from: current_status,
                to: DisbursementStatus::Rejected,
            }),
        }
    }

    /// Mark an approved disbursement as paid.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the disbursement
    /// * `disbursed_by` - The actor recording the payout
    /// * `details` - The payment details, validated before the transition
    ///
    /// # Returns
    /// * `Ok(TransitionAction::Pay)` if the transition is valid
    /// * `Err(EngineError::InvalidTransition)` if not in Approved status
    /// * `Err(EngineError::InvalidAmount | InvalidFee | PaymentDetailsIncomplete)`
    ///   if the details are malformed
    pub fn pay(
        current_status: DisbursementStatus,
        disbursed_by: Uuid,
        details: PaymentDetails,
    ) -> Result<TransitionAction, EngineError> {
        Self::validate_payment(&details)?;

        match current_status {
            DisbursementStatus::Approved => Ok(TransitionAction::Pay {
                new_status: DisbursementStatus::Paid,
                disbursed_by,
                disbursed_at: Utc::now(),
                details,
            }),
            _ => Err(EngineError::InvalidTransition {
                from: current_status,
                to: DisbursementStatus::Paid,
            }),
        }
    }

    /// Validate that a disbursement may be hard-deleted.
    ///
    /// # Returns
    /// * `Ok(())` while in Draft, Submitted, or Rejected status
    /// * `Err(EngineError::NotDeletable)` once Approved or Paid
    pub fn delete(current_status: DisbursementStatus) -> Result<(), EngineError> {
        if current_status.is_deletable() {
            return Ok(());
        }
        Err(EngineError::NotDeletable(current_status))
    }

    /// Clone a rejected disbursement into a fresh draft.
    ///
    /// The rejected record itself never changes; the caller persists a
    /// new record linked back to the original.
    ///
    /// # Returns
    /// * `Ok(TransitionAction::Resubmit)` if the record is Rejected
    /// * `Err(EngineError::InvalidTransition)` otherwise
    pub fn resubmit(
        current_status: DisbursementStatus,
        resubmitted_by: Uuid,
    ) -> Result<TransitionAction, EngineError> {
        match current_status {
            DisbursementStatus::Rejected => Ok(TransitionAction::Resubmit {
                new_status: DisbursementStatus::Draft,
                resubmitted_by,
                resubmitted_at: Utc::now(),
            }),
            _ => Err(EngineError::InvalidTransition {
                from: current_status,
                to: DisbursementStatus::Draft,
            }),
        }
    }

    /// Validate a disbursement amount: positive, whole rupiah.
    pub fn validate_amount(amount: Decimal) -> Result<(), EngineError> {
        if money::is_valid_amount(&amount) {
            return Ok(());
        }
        Err(EngineError::InvalidAmount(amount))
    }

    /// Validate payment details for the pay transition.
    pub fn validate_payment(details: &PaymentDetails) -> Result<(), EngineError> {
        if !money::is_valid_amount(&details.transferred_amount) {
            return Err(EngineError::InvalidAmount(details.transferred_amount));
        }
        if !money::is_valid_fee(&details.additional_fees) {
            return Err(EngineError::InvalidFee(details.additional_fees));
        }
        if details.transfer_proof_url.trim().is_empty() {
            return Err(EngineError::PaymentDetailsIncomplete("transfer_proof_url"));
        }
        if details.destination_bank_id.is_nil() {
            return Err(EngineError::PaymentDetailsIncomplete("destination_bank_id"));
        }
        Ok(())
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Draft → Submitted (submit)
    /// - Submitted → Approved (approve)
    /// - Submitted → Rejected (reject)
    /// - Approved → Paid (pay)
    ///
    /// # Arguments
    /// * `from` - The current status
    /// * `to` - The target status
    ///
    /// # Returns
    /// `true` if the transition is valid, `false` otherwise
    #[must_use]
    pub fn is_valid_transition(from: DisbursementStatus, to: DisbursementStatus) -> bool {
        matches!(
            (from, to),
            (DisbursementStatus::Draft, DisbursementStatus::Submitted)
                | (
                    DisbursementStatus::Submitted,
                    DisbursementStatus::Approved | DisbursementStatus::Rejected
                )
                | (DisbursementStatus::Approved, DisbursementStatus::Paid)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn payment() -> PaymentDetails {
        PaymentDetails {
            transferred_amount: dec!(700_000),
            additional_fees: dec!(2_500),
            transfer_date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            transfer_proof_url: "https://files.example.org/proof/123.jpg".to_string(),
            destination_bank_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_submit_from_draft() {
        let actor = Uuid::new_v4();
        let action = TransitionEngine::submit(DisbursementStatus::Draft, actor).unwrap();
        assert_eq!(action.new_status(), DisbursementStatus::Submitted);
    }

    #[test]
    fn test_submit_from_non_draft_fails() {
        let actor = Uuid::new_v4();
        for status in [
            DisbursementStatus::Submitted,
            DisbursementStatus::Approved,
            DisbursementStatus::Rejected,
            DisbursementStatus::Paid,
        ] {
            let result = TransitionEngine::submit(status, actor);
            assert!(matches!(result, Err(EngineError::InvalidTransition { .. })));
        }
    }

    #[test]
    fn test_approve_from_submitted() {
        let actor = Uuid::new_v4();
        let action = TransitionEngine::approve(DisbursementStatus::Submitted, actor).unwrap();
        assert_eq!(action.new_status(), DisbursementStatus::Approved);
    }

    #[test]
    fn test_approve_replay_fails() {
        let actor = Uuid::new_v4();
        let result = TransitionEngine::approve(DisbursementStatus::Approved, actor);
        assert!(matches!(result, Err(EngineError::InvalidTransition { .. })));
    }

    #[test]
    fn test_reject_from_submitted() {
        let action = TransitionEngine::reject(
            DisbursementStatus::Submitted,
            "Amount exceeds agreed budget".to_string(),
        )
        .unwrap();
        assert_eq!(action.new_status(), DisbursementStatus::Rejected);
    }

    #[test]
    fn test_reject_empty_reason_fails() {
        let result = TransitionEngine::reject(DisbursementStatus::Submitted, String::new());
        assert!(matches!(result, Err(EngineError::RejectionReasonRequired)));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let result = TransitionEngine::reject(DisbursementStatus::Submitted, "   ".to_string());
        assert!(matches!(result, Err(EngineError::RejectionReasonRequired)));
    }

    #[test]
    fn test_pay_from_approved() {
        let actor = Uuid::new_v4();
        let action =
            TransitionEngine::pay(DisbursementStatus::Approved, actor, payment()).unwrap();
        assert_eq!(action.new_status(), DisbursementStatus::Paid);
    }

    #[test]
    fn test_pay_from_non_approved_fails() {
        let actor = Uuid::new_v4();
        let result = TransitionEngine::pay(DisbursementStatus::Submitted, actor, payment());
        assert!(matches!(result, Err(EngineError::InvalidTransition { .. })));
    }

    #[test]
    fn test_pay_without_proof_fails() {
        let actor = Uuid::new_v4();
        let details = PaymentDetails {
            transfer_proof_url: "  ".to_string(),
            ..payment()
        };
        let result = TransitionEngine::pay(DisbursementStatus::Approved, actor, details);
        assert!(matches!(
            result,
            Err(EngineError::PaymentDetailsIncomplete("transfer_proof_url"))
        ));
    }

    #[test]
    fn test_pay_with_negative_fee_fails() {
        let actor = Uuid::new_v4();
        let details = PaymentDetails {
            additional_fees: dec!(-100),
            ..payment()
        };
        let result = TransitionEngine::pay(DisbursementStatus::Approved, actor, details);
        assert!(matches!(result, Err(EngineError::InvalidFee(_))));
    }

    #[test]
    fn test_pay_with_fractional_amount_fails() {
        let actor = Uuid::new_v4();
        let details = PaymentDetails {
            transferred_amount: dec!(700_000.50),
            ..payment()
        };
        let result = TransitionEngine::pay(DisbursementStatus::Approved, actor, details);
        assert!(matches!(result, Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn test_delete_statuses() {
        for status in [
            DisbursementStatus::Draft,
            DisbursementStatus::Submitted,
            DisbursementStatus::Rejected,
        ] {
            TransitionEngine::delete(status).unwrap();
        }
        assert!(matches!(
            TransitionEngine::delete(DisbursementStatus::Approved),
            Err(EngineError::NotDeletable(DisbursementStatus::Approved))
        ));
        assert!(matches!(
            TransitionEngine::delete(DisbursementStatus::Paid),
            Err(EngineError::NotDeletable(DisbursementStatus::Paid))
        ));
    }

    #[test]
    fn test_resubmit_from_rejected() {
        let actor = Uuid::new_v4();
        let action = TransitionEngine::resubmit(DisbursementStatus::Rejected, actor).unwrap();
        assert_eq!(action.new_status(), DisbursementStatus::Draft);
    }

    #[test]
    fn test_resubmit_from_non_rejected_fails() {
        let actor = Uuid::new_v4();
        let result = TransitionEngine::resubmit(DisbursementStatus::Paid, actor);
        assert!(matches!(result, Err(EngineError::InvalidTransition { .. })));
    }

    #[test]
    fn test_validate_amount() {
        TransitionEngine::validate_amount(dec!(1)).unwrap();
        assert!(TransitionEngine::validate_amount(dec!(0)).is_err());
        assert!(TransitionEngine::validate_amount(dec!(-10)).is_err());
        assert!(TransitionEngine::validate_amount(dec!(10.5)).is_err());
    }

    #[test]
    fn test_is_valid_transition() {
        // Valid transitions
        assert!(TransitionEngine::is_valid_transition(
            DisbursementStatus::Draft,
            DisbursementStatus::Submitted
        ));
        assert!(TransitionEngine::is_valid_transition(
            DisbursementStatus::Submitted,
            DisbursementStatus::Approved
        ));
        assert!(TransitionEngine::is_valid_transition(
            DisbursementStatus::Submitted,
            DisbursementStatus::Rejected
        ));
        assert!(TransitionEngine::is_valid_transition(
            DisbursementStatus::Approved,
            DisbursementStatus::Paid
        ));

        // Invalid transitions
        assert!(!TransitionEngine::is_valid_transition(
            DisbursementStatus::Draft,
            DisbursementStatus::Approved
        ));
        assert!(!TransitionEngine::is_valid_transition(
            DisbursementStatus::Rejected,
            DisbursementStatus::Submitted
        ));
        assert!(!TransitionEngine::is_valid_transition(
            DisbursementStatus::Paid,
            DisbursementStatus::Draft
        ));
    }
}
