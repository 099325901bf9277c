//! Category to recipient-shape validation.
//!
//! Each disbursement category admits a closed set of recipient kinds.
//! Directory-backed kinds must come with a resolved directory snapshot;
//! manual kinds must carry complete bank details; the developer
//! revenue-share category accepts no client recipient at all and always
//! pays the configuration-defined payee.

use amanah_shared::DeveloperPayee;

use crate::disbursement::error::EngineError;
use crate::disbursement::types::DisbursementCategory;
use crate::recipient::types::{RecipientKind, RecipientRef, RecipientSnapshot, ResolvedRecipient};

/// Stateless recipient-shape validator.
pub struct RecipientRules;

impl RecipientRules {
    /// Returns the recipient kinds a category admits.
    ///
    /// `revenue_share_developer` returns an empty slice: its payee comes
    /// from configuration, never from the client.
    #[must_use]
    pub fn allowed_kinds(category: DisbursementCategory) -> &'static [RecipientKind] {
        match category {
            DisbursementCategory::CampaignToBeneficiary => &[
                RecipientKind::Employee,
                RecipientKind::Mitra,
                RecipientKind::Fundraiser,
                RecipientKind::Manual,
            ],
            DisbursementCategory::ZakatToMustahiq => &[RecipientKind::Mustahiq],
            DisbursementCategory::QurbanPurchaseSapi
            | DisbursementCategory::QurbanPurchaseKambing
            | DisbursementCategory::VendorPayment => &[RecipientKind::Vendor],
            DisbursementCategory::QurbanExecutionFee => &[
                RecipientKind::Vendor,
                RecipientKind::Mitra,
                RecipientKind::Manual,
            ],
            DisbursementCategory::OperationalExpense => {
                &[RecipientKind::Employee, RecipientKind::Manual]
            }
            DisbursementCategory::RevenueShareMitra => &[RecipientKind::Mitra],
            DisbursementCategory::RevenueShareFundraiser => &[RecipientKind::Fundraiser],
            DisbursementCategory::RevenueShareDeveloper => &[],
        }
    }

    /// Validates the recipient payload for a category and produces the
    /// snapshot to persist on the disbursement row.
    ///
    /// `resolved` carries the directory lookup result for
    /// directory-backed kinds; callers pass `None` when the lookup
    /// found nothing (or when the recipient is manual).
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailed`-kind error when the recipient is
    /// missing, of a kind the category does not admit, incomplete
    /// (manual), unresolvable (directory), or supplied for the
    /// fixed-payee developer category.
    pub fn resolve(
        category: DisbursementCategory,
        recipient: Option<&RecipientRef>,
        resolved: Option<ResolvedRecipient>,
        developer_payee: &DeveloperPayee,
    ) -> Result<RecipientSnapshot, EngineError> {
        if category == DisbursementCategory::RevenueShareDeveloper {
            if recipient.is_some() {
                return Err(EngineError::RecipientFixedByConfig);
            }
            return Ok(RecipientSnapshot {
                kind: RecipientKind::Manual,
                directory_id: None,
                name: developer_payee.name.clone(),
                contact: developer_payee.contact.clone(),
                bank_name: Some(developer_payee.bank_name.clone()),
                bank_account: Some(developer_payee.bank_account.clone()),
                bank_account_name: Some(developer_payee.bank_account_name.clone()),
                asnaf: None,
            });
        }

        let recipient = recipient.ok_or(EngineError::RecipientRequired(category))?;
        let kind = recipient.kind();
        if !Self::allowed_kinds(category).contains(&kind) {
            return Err(EngineError::RecipientKindNotAllowed { category, kind });
        }

        match recipient {
            RecipientRef::Manual {
                name,
                contact,
                bank_name,
                bank_account,
                bank_account_name,
            } => {
                if name.trim().is_empty() {
                    return Err(EngineError::ManualRecipientIncomplete("name"));
                }
                if bank_name.trim().is_empty() {
                    return Err(EngineError::ManualRecipientIncomplete("bank_name"));
                }
                if bank_account.trim().is_empty() {
                    return Err(EngineError::ManualRecipientIncomplete("bank_account"));
                }
                if bank_account_name.trim().is_empty() {
                    return Err(EngineError::ManualRecipientIncomplete("bank_account_name"));
                }
                Ok(RecipientSnapshot {
                    kind: RecipientKind::Manual,
                    directory_id: None,
                    name: name.clone(),
                    contact: contact.clone(),
                    bank_name: Some(bank_name.clone()),
                    bank_account: Some(bank_account.clone()),
                    bank_account_name: Some(bank_account_name.clone()),
                    asnaf: None,
                })
            }
            _ => {
                // Directory-backed kinds always carry an id.
                let id = recipient
                    .directory_id()
                    .ok_or(EngineError::RecipientRequired(category))?;
                let entry = resolved.ok_or(EngineError::RecipientNotFound { kind, id })?;
                Ok(RecipientSnapshot {
                    kind,
                    directory_id: Some(id),
                    name: entry.name,
                    contact: entry.contact,
                    bank_name: entry.bank_name,
                    bank_account: entry.bank_account,
                    bank_account_name: entry.bank_account_name,
                    asnaf: entry.asnaf,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn payee() -> DeveloperPayee {
        DeveloperPayee {
            name: "Platform Developer".to_string(),
            contact: Some("dev@example.org".to_string()),
            bank_name: "BCA".to_string(),
            bank_account: "8310042117".to_string(),
            bank_account_name: "Platform Developer".to_string(),
        }
    }

    fn resolved() -> ResolvedRecipient {
        ResolvedRecipient {
            name: "Budi Santoso".to_string(),
            contact: Some("+62812".to_string()),
            bank_name: Some("Mandiri".to_string()),
            bank_account: Some("1400011223".to_string()),
            bank_account_name: Some("Budi Santoso".to_string()),
            asnaf: None,
        }
    }

    fn manual_ref() -> RecipientRef {
        RecipientRef::Manual {
            name: "Yayasan Amal".to_string(),
            contact: None,
            bank_name: "BSI".to_string(),
            bank_account: "7201449301".to_string(),
            bank_account_name: "Yayasan Amal".to_string(),
        }
    }

    #[rstest]
    #[case(DisbursementCategory::CampaignToBeneficiary, RecipientKind::Employee, true)]
    #[case(DisbursementCategory::CampaignToBeneficiary, RecipientKind::Mustahiq, false)]
    #[case(DisbursementCategory::ZakatToMustahiq, RecipientKind::Mustahiq, true)]
    #[case(DisbursementCategory::ZakatToMustahiq, RecipientKind::Vendor, false)]
    #[case(DisbursementCategory::QurbanPurchaseSapi, RecipientKind::Vendor, true)]
    #[case(DisbursementCategory::QurbanPurchaseKambing, RecipientKind::Mitra, false)]
    #[case(DisbursementCategory::QurbanExecutionFee, RecipientKind::Mitra, true)]
    #[case(DisbursementCategory::OperationalExpense, RecipientKind::Employee, true)]
    #[case(DisbursementCategory::OperationalExpense, RecipientKind::Vendor, false)]
    #[case(DisbursementCategory::VendorPayment, RecipientKind::Vendor, true)]
    #[case(DisbursementCategory::RevenueShareMitra, RecipientKind::Mitra, true)]
    #[case(DisbursementCategory::RevenueShareMitra, RecipientKind::Fundraiser, false)]
    #[case(DisbursementCategory::RevenueShareFundraiser, RecipientKind::Fundraiser, true)]
    fn test_allowed_kinds_matrix(
        #[case] category: DisbursementCategory,
        #[case] kind: RecipientKind,
        #[case] allowed: bool,
    ) {
        assert_eq!(RecipientRules::allowed_kinds(category).contains(&kind), allowed);
    }

    #[test]
    fn test_directory_recipient_resolves_to_snapshot() {
        let id = Uuid::new_v4();
        let snapshot = RecipientRules::resolve(
            DisbursementCategory::ZakatToMustahiq,
            Some(&RecipientRef::Mustahiq { id }),
            Some(ResolvedRecipient {
                asnaf: Some("fakir".to_string()),
                ..resolved()
            }),
            &payee(),
        )
        .unwrap();
        assert_eq!(snapshot.kind, RecipientKind::Mustahiq);
        assert_eq!(snapshot.directory_id, Some(id));
        assert_eq!(snapshot.name, "Budi Santoso");
        assert_eq!(snapshot.asnaf.as_deref(), Some("fakir"));
    }

    #[test]
    fn test_unresolved_directory_recipient_fails() {
        let id = Uuid::new_v4();
        let err = RecipientRules::resolve(
            DisbursementCategory::VendorPayment,
            Some(&RecipientRef::Vendor { id }),
            None,
            &payee(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_NOT_FOUND");
    }

    #[test]
    fn test_missing_recipient_fails() {
        let err = RecipientRules::resolve(
            DisbursementCategory::CampaignToBeneficiary,
            None,
            None,
            &payee(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_REQUIRED");
    }

    #[test]
    fn test_wrong_kind_fails() {
        let err = RecipientRules::resolve(
            DisbursementCategory::ZakatToMustahiq,
            Some(&RecipientRef::Vendor { id: Uuid::new_v4() }),
            Some(resolved()),
            &payee(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_KIND_NOT_ALLOWED");
    }

    #[test]
    fn test_manual_recipient_passes_with_full_details() {
        let snapshot = RecipientRules::resolve(
            DisbursementCategory::QurbanExecutionFee,
            Some(&manual_ref()),
            None,
            &payee(),
        )
        .unwrap();
        assert_eq!(snapshot.kind, RecipientKind::Manual);
        assert_eq!(snapshot.directory_id, None);
        assert_eq!(snapshot.bank_account.as_deref(), Some("7201449301"));
    }

    #[rstest]
    #[case("", "BSI", "7201449301", "Yayasan Amal", "name")]
    #[case("Yayasan Amal", " ", "7201449301", "Yayasan Amal", "bank_name")]
    #[case("Yayasan Amal", "BSI", "", "Yayasan Amal", "bank_account")]
    #[case("Yayasan Amal", "BSI", "7201449301", "", "bank_account_name")]
    fn test_manual_recipient_missing_field_fails(
        #[case] name: &str,
        #[case] bank_name: &str,
        #[case] bank_account: &str,
        #[case] bank_account_name: &str,
        #[case] missing: &str,
    ) {
        let recipient = RecipientRef::Manual {
            name: name.to_string(),
            contact: None,
            bank_name: bank_name.to_string(),
            bank_account: bank_account.to_string(),
            bank_account_name: bank_account_name.to_string(),
        };
        let err = RecipientRules::resolve(
            DisbursementCategory::OperationalExpense,
            Some(&recipient),
            None,
            &payee(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(missing));
    }

    #[test]
    fn test_developer_share_uses_configured_payee() {
        let snapshot = RecipientRules::resolve(
            DisbursementCategory::RevenueShareDeveloper,
            None,
            None,
            &payee(),
        )
        .unwrap();
        assert_eq!(snapshot.kind, RecipientKind::Manual);
        assert_eq!(snapshot.name, "Platform Developer");
        assert_eq!(snapshot.bank_account.as_deref(), Some("8310042117"));
    }

    #[test]
    fn test_developer_share_rejects_client_recipient() {
        let err = RecipientRules::resolve(
            DisbursementCategory::RevenueShareDeveloper,
            Some(&manual_ref()),
            None,
            &payee(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RECIPIENT_FIXED_BY_CONFIG");
    }
}
