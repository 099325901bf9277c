//! Centralized authorization matrix for disbursement operations.
//!
//! All role checks for the engine live here, keyed off the actor's role
//! set. Call sites never combine role flags themselves.

use uuid::Uuid;

use crate::authz::role::{Role, RoleSet};
use crate::disbursement::error::EngineError;
use crate::disbursement::types::{DisbursementCategory, DisbursementType};

/// The three review actions gated by the same rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Approve a submitted disbursement.
    Approve,
    /// Reject a submitted disbursement.
    Reject,
    /// Mark an approved disbursement as paid.
    MarkPaid,
}

/// Stateless authorization matrix.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Authorizes creating (or re-submitting as a new draft) a
    /// disbursement of the given type and category.
    ///
    /// Grants union across the actor's roles:
    /// - `super_admin` and `admin_finance` create anything for anyone.
    /// - `admin_campaign` creates campaign disbursements for anyone.
    /// - `program_coordinator` and `employee` create campaign
    ///   disbursements naming themselves as recipient.
    /// - `mitra` creates campaign/zakat/qurban/revenue-share
    ///   disbursements naming themselves as recipient.
    ///
    /// # Errors
    ///
    /// `RecipientMustBeSelf` when only a self-service grant matches the
    /// type but the recipient is not the actor; `NotAuthorizedToCreate`
    /// when no grant matches at all.
    pub fn authorize_create(
        actor: Uuid,
        roles: &RoleSet,
        disbursement_type: DisbursementType,
        category: DisbursementCategory,
        recipient_directory_id: Option<Uuid>,
    ) -> Result<(), EngineError> {
        if roles.contains_any(&[Role::SuperAdmin, Role::AdminFinance]) {
            return Ok(());
        }
        if roles.contains(Role::AdminCampaign) && disbursement_type == DisbursementType::Campaign {
            return Ok(());
        }

        let self_service_grant = (roles.contains_any(&[Role::ProgramCoordinator, Role::Employee])
            && disbursement_type == DisbursementType::Campaign)
            || (roles.contains(Role::Mitra)
                && matches!(
                    disbursement_type,
                    DisbursementType::Campaign
                        | DisbursementType::Zakat
                        | DisbursementType::Qurban
                        | DisbursementType::RevenueShare
                ));

        if self_service_grant {
            if recipient_directory_id == Some(actor) {
                return Ok(());
            }
            return Err(EngineError::RecipientMustBeSelf { actor });
        }

        Err(EngineError::NotAuthorizedToCreate { actor, category })
    }

    /// Authorizes submitting a draft: its creator, or an elevated role.
    pub fn authorize_submit(
        actor: Uuid,
        roles: &RoleSet,
        created_by: Uuid,
    ) -> Result<(), EngineError> {
        if actor == created_by || roles.is_elevated() {
            return Ok(());
        }
        Err(EngineError::NotAuthorizedToSubmit { actor })
    }

    /// Authorizes a review action (approve, reject, mark paid).
    ///
    /// Review rights require `admin_finance` or `super_admin` in the
    /// set; a set drawn exclusively from the self-service roles is
    /// always refused. Approve additionally refuses the record's own
    /// creator regardless of role.
    pub fn authorize_review(
        actor: Uuid,
        roles: &RoleSet,
        action: ReviewAction,
        created_by: Uuid,
    ) -> Result<(), EngineError> {
        if !roles.can_review() {
            return Err(EngineError::NotAuthorizedToReview { actor });
        }
        if action == ReviewAction::Approve && actor == created_by {
            return Err(EngineError::SelfApprovalForbidden { actor });
        }
        Ok(())
    }

    /// Authorizes editing a draft: its creator, or an elevated role.
    pub fn authorize_update(
        actor: Uuid,
        roles: &RoleSet,
        created_by: Uuid,
    ) -> Result<(), EngineError> {
        if actor == created_by || roles.is_elevated() {
            return Ok(());
        }
        Err(EngineError::NotAuthorizedToModify { actor })
    }

    /// Authorizes deleting a record: its creator, or an elevated role.
    /// Status preconditions are the transition engine's concern.
    pub fn authorize_delete(
        actor: Uuid,
        roles: &RoleSet,
        created_by: Uuid,
    ) -> Result<(), EngineError> {
        if actor == created_by || roles.is_elevated() {
            return Ok(());
        }
        Err(EngineError::NotAuthorizedToDelete { actor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn actor() -> Uuid {
        Uuid::from_u128(0xA1)
    }

    fn other() -> Uuid {
        Uuid::from_u128(0xB2)
    }

    #[rstest]
    #[case(&[Role::SuperAdmin], DisbursementType::Operational, false, true)]
    #[case(&[Role::AdminFinance], DisbursementType::RevenueShare, false, true)]
    #[case(&[Role::AdminCampaign], DisbursementType::Campaign, false, true)]
    #[case(&[Role::AdminCampaign], DisbursementType::Zakat, false, false)]
    #[case(&[Role::ProgramCoordinator], DisbursementType::Campaign, true, true)]
    #[case(&[Role::ProgramCoordinator], DisbursementType::Campaign, false, false)]
    #[case(&[Role::Employee], DisbursementType::Qurban, true, false)]
    #[case(&[Role::Mitra], DisbursementType::Qurban, true, true)]
    #[case(&[Role::Mitra], DisbursementType::Operational, true, false)]
    #[case(&[], DisbursementType::Campaign, true, false)]
    fn test_create_matrix(
        #[case] roles: &[Role],
        #[case] disbursement_type: DisbursementType,
        #[case] self_recipient: bool,
        #[case] allowed: bool,
    ) {
        let roles = RoleSet::from(roles);
        let recipient = self_recipient.then(actor);
        let result = AuthorizationGate::authorize_create(
            actor(),
            &roles,
            disbursement_type,
            DisbursementCategory::CampaignToBeneficiary,
            recipient,
        );
        assert_eq!(result.is_ok(), allowed);
    }

    #[test]
    fn test_self_service_role_must_name_self() {
        let roles: RoleSet = [Role::Employee].into();
        let err = AuthorizationGate::authorize_create(
            actor(),
            &roles,
            DisbursementType::Campaign,
            DisbursementCategory::CampaignToBeneficiary,
            Some(other()),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_MUST_BE_SELF");
    }

    #[test]
    fn test_union_across_roles_keeps_widest_grant() {
        // A mitra who is also admin_finance creates for anyone.
        let roles: RoleSet = [Role::Mitra, Role::AdminFinance].into();
        AuthorizationGate::authorize_create(
            actor(),
            &roles,
            DisbursementType::Operational,
            DisbursementCategory::OperationalExpense,
            None,
        )
        .expect("admin_finance grant applies");
    }

    #[rstest]
    #[case(&[Role::ProgramCoordinator])]
    #[case(&[Role::Mitra])]
    #[case(&[Role::AdminCampaign])]
    #[case(&[Role::AdminCampaign, Role::ProgramCoordinator, Role::Employee, Role::Mitra])]
    fn test_self_service_sets_never_review(#[case] roles: &[Role]) {
        let roles = RoleSet::from(roles);
        for action in [ReviewAction::Approve, ReviewAction::Reject, ReviewAction::MarkPaid] {
            let err =
                AuthorizationGate::authorize_review(actor(), &roles, action, other()).unwrap_err();
            assert_eq!(err.error_code(), "NOT_AUTHORIZED_TO_REVIEW");
        }
    }

    #[test]
    fn test_creator_cannot_approve_own_record() {
        let roles: RoleSet = [Role::AdminFinance].into();
        let err =
            AuthorizationGate::authorize_review(actor(), &roles, ReviewAction::Approve, actor())
                .unwrap_err();
        assert_eq!(err.error_code(), "SELF_APPROVAL_FORBIDDEN");
    }

    #[test]
    fn test_creator_may_reject_and_pay_own_record() {
        // Segregation of duties binds approval only.
        let roles: RoleSet = [Role::SuperAdmin].into();
        AuthorizationGate::authorize_review(actor(), &roles, ReviewAction::Reject, actor())
            .expect("reject allowed");
        AuthorizationGate::authorize_review(actor(), &roles, ReviewAction::MarkPaid, actor())
            .expect("pay allowed");
    }

    #[test]
    fn test_submit_creator_or_elevated() {
        let none = RoleSet::new();
        AuthorizationGate::authorize_submit(actor(), &none, actor()).expect("creator submits");

        let finance: RoleSet = [Role::AdminFinance].into();
        AuthorizationGate::authorize_submit(actor(), &finance, other())
            .expect("elevated submits for others");

        let err = AuthorizationGate::authorize_submit(actor(), &none, other()).unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED_TO_SUBMIT");
    }

    #[test]
    fn test_delete_creator_or_elevated() {
        let coordinator: RoleSet = [Role::ProgramCoordinator].into();
        AuthorizationGate::authorize_delete(actor(), &coordinator, actor())
            .expect("creator deletes");

        let err = AuthorizationGate::authorize_delete(actor(), &coordinator, other()).unwrap_err();
        assert_eq!(err.error_code(), "NOT_AUTHORIZED_TO_DELETE");
    }
}
