//! Property-based tests for the authorization matrix.

use proptest::prelude::*;
use uuid::Uuid;

use crate::authz::gate::{AuthorizationGate, ReviewAction};
use crate::authz::role::{Role, RoleSet};
use crate::disbursement::types::{DisbursementCategory, DisbursementType};

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Mitra),
        Just(Role::Employee),
        Just(Role::ProgramCoordinator),
        Just(Role::AdminCampaign),
        Just(Role::AdminFinance),
        Just(Role::SuperAdmin),
    ]
}

fn arb_role_set() -> impl Strategy<Value = RoleSet> {
    proptest::collection::vec(arb_role(), 0..4).prop_map(|roles| roles.into_iter().collect())
}

fn arb_type() -> impl Strategy<Value = DisbursementType> {
    prop_oneof![
        Just(DisbursementType::Campaign),
        Just(DisbursementType::Zakat),
        Just(DisbursementType::Qurban),
        Just(DisbursementType::Operational),
        Just(DisbursementType::Vendor),
        Just(DisbursementType::RevenueShare),
    ]
}

fn arb_category() -> impl Strategy<Value = DisbursementCategory> {
    prop_oneof![
        Just(DisbursementCategory::CampaignToBeneficiary),
        Just(DisbursementCategory::ZakatToMustahiq),
        Just(DisbursementCategory::QurbanPurchaseSapi),
        Just(DisbursementCategory::QurbanPurchaseKambing),
        Just(DisbursementCategory::QurbanExecutionFee),
        Just(DisbursementCategory::OperationalExpense),
        Just(DisbursementCategory::VendorPayment),
        Just(DisbursementCategory::RevenueShareMitra),
        Just(DisbursementCategory::RevenueShareFundraiser),
        Just(DisbursementCategory::RevenueShareDeveloper),
    ]
}

fn arb_review_action() -> impl Strategy<Value = ReviewAction> {
    prop_oneof![
        Just(ReviewAction::Approve),
        Just(ReviewAction::Reject),
        Just(ReviewAction::MarkPaid),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_review_rights_match_role_membership(
        roles in arb_role_set(),
        action in arb_review_action(),
        actor in arb_uuid(),
        created_by in arb_uuid(),
    ) {
        prop_assume!(actor != created_by);
        let result = AuthorizationGate::authorize_review(actor, &roles, action, created_by);
        prop_assert_eq!(result.is_ok(), roles.can_review());
    }

    #[test]
    fn prop_self_approval_always_refused(roles in arb_role_set(), actor in arb_uuid()) {
        let result =
            AuthorizationGate::authorize_review(actor, &roles, ReviewAction::Approve, actor);
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_adding_roles_never_revokes_create(
        roles in arb_role_set(),
        extra in arb_role(),
        dtype in arb_type(),
        category in arb_category(),
        actor in arb_uuid(),
        self_recipient in any::<bool>(),
    ) {
        let recipient = self_recipient.then_some(actor);
        let before =
            AuthorizationGate::authorize_create(actor, &roles, dtype, category, recipient);
        if before.is_ok() {
            let mut wider = roles.clone();
            wider.insert(extra);
            let after =
                AuthorizationGate::authorize_create(actor, &wider, dtype, category, recipient);
            prop_assert!(after.is_ok());
        }
    }

    #[test]
    fn prop_super_admin_creates_anything(
        dtype in arb_type(),
        category in arb_category(),
        actor in arb_uuid(),
        recipient in proptest::option::of(arb_uuid()),
    ) {
        let roles: RoleSet = [Role::SuperAdmin].into();
        let result =
            AuthorizationGate::authorize_create(actor, &roles, dtype, category, recipient);
        prop_assert!(result.is_ok());
    }

    #[test]
    fn prop_empty_role_set_creates_nothing(
        dtype in arb_type(),
        category in arb_category(),
        actor in arb_uuid(),
        recipient in proptest::option::of(arb_uuid()),
    ) {
        let result = AuthorizationGate::authorize_create(
            actor,
            &RoleSet::new(),
            dtype,
            category,
            recipient,
        );
        prop_assert!(result.is_err());
    }
}
