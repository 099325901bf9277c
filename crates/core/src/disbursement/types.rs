//! Disbursement domain types for lifecycle management.
//!
//! This module defines the core types used for managing disbursement
//! status transitions and lifecycle actions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::recipient::RecipientRef;

/// Disbursement status in the payout workflow.
///
/// Disbursements progress through these states from drafting to payout.
/// The valid transitions are:
/// - Draft → Submitted (submit)
/// - Submitted → Approved (approve)
/// - Submitted → Rejected (reject)
/// - Approved → Paid (pay)
///
/// Rejected and Paid are terminal; re-submitting a rejected disbursement
/// creates a new record instead of reviving the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisbursementStatus {
    /// Disbursement is being drafted and can be modified.
    Draft,
    /// Disbursement has been submitted and its amount counts against the pool.
    Submitted,
    /// Disbursement has been approved and is awaiting payout.
    Approved,
    /// Disbursement has been rejected (immutable, commitment released).
    Rejected,
    /// Disbursement has been paid out (immutable).
    Paid,
}

impl DisbursementStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Returns true if a disbursement in this status counts against
    /// its pool's available funds.
    #[must_use]
    pub fn commits_funds(&self) -> bool {
        matches!(self, Self::Submitted | Self::Approved | Self::Paid)
    }

    /// Returns true if the disbursement can still be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the disbursement may be deleted.
    #[must_use]
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted | Self::Rejected)
    }

    /// Returns true if no further transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Paid)
    }
}

impl fmt::Display for DisbursementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse disbursement type, one per funding programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementType {
    /// Payout funded by a donation campaign.
    Campaign,
    /// Zakat distribution for a collection period.
    Zakat,
    /// Qurban purchase or execution for a qurban period.
    Qurban,
    /// Internal operational spend (uncapped).
    Operational,
    /// Vendor invoice payment (uncapped).
    Vendor,
    /// Revenue-share payout to a partner, fundraiser, or the developer.
    RevenueShare,
}

impl DisbursementType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Zakat => "zakat",
            Self::Qurban => "qurban",
            Self::Operational => "operational",
            Self::Vendor => "vendor",
            Self::RevenueShare => "revenue_share",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "campaign" => Some(Self::Campaign),
            "zakat" => Some(Self::Zakat),
            "qurban" => Some(Self::Qurban),
            "operational" => Some(Self::Operational),
            "vendor" => Some(Self::Vendor),
            "revenue_share" => Some(Self::RevenueShare),
            _ => None,
        }
    }
}

impl fmt::Display for DisbursementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fine-grained disbursement category.
///
/// The category drives pool-key derivation (which capacity the amount
/// competes for) and the allowed recipient shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementCategory {
    /// Campaign funds handed to a beneficiary.
    CampaignToBeneficiary,
    /// Zakat distributed to a registered mustahiq.
    ZakatToMustahiq,
    /// Cow purchase for a qurban period.
    QurbanPurchaseSapi,
    /// Goat purchase for a qurban period.
    QurbanPurchaseKambing,
    /// Slaughter/distribution execution fee for a qurban period.
    QurbanExecutionFee,
    /// Internal operational expense; derives no pool.
    OperationalExpense,
    /// Vendor invoice payment; derives no pool.
    VendorPayment,
    /// Revenue share owed to a mitra.
    RevenueShareMitra,
    /// Revenue share owed to a fundraiser.
    RevenueShareFundraiser,
    /// Revenue share owed to the platform developer (fixed payee).
    RevenueShareDeveloper,
}

impl DisbursementCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignToBeneficiary => "campaign_to_beneficiary",
            Self::ZakatToMustahiq => "zakat_to_mustahiq",
            Self::QurbanPurchaseSapi => "qurban_purchase_sapi",
            Self::QurbanPurchaseKambing => "qurban_purchase_kambing",
            Self::QurbanExecutionFee => "qurban_execution_fee",
            Self::OperationalExpense => "operational_expense",
            Self::VendorPayment => "vendor_payment",
            Self::RevenueShareMitra => "revenue_share_mitra",
            Self::RevenueShareFundraiser => "revenue_share_fundraiser",
            Self::RevenueShareDeveloper => "revenue_share_developer",
        }
    }

    /// Parses a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "campaign_to_beneficiary" => Some(Self::CampaignToBeneficiary),
            "zakat_to_mustahiq" => Some(Self::ZakatToMustahiq),
            "qurban_purchase_sapi" => Some(Self::QurbanPurchaseSapi),
            "qurban_purchase_kambing" => Some(Self::QurbanPurchaseKambing),
            "qurban_execution_fee" => Some(Self::QurbanExecutionFee),
            "operational_expense" => Some(Self::OperationalExpense),
            "vendor_payment" => Some(Self::VendorPayment),
            "revenue_share_mitra" => Some(Self::RevenueShareMitra),
            "revenue_share_fundraiser" => Some(Self::RevenueShareFundraiser),
            "revenue_share_developer" => Some(Self::RevenueShareDeveloper),
            _ => None,
        }
    }

    /// Returns the disbursement types this category is valid under.
    #[must_use]
    pub fn compatible_types(&self) -> &'static [DisbursementType] {
        match self {
            Self::CampaignToBeneficiary => &[DisbursementType::Campaign],
            Self::ZakatToMustahiq => &[DisbursementType::Zakat],
            Self::QurbanPurchaseSapi | Self::QurbanPurchaseKambing => {
                &[DisbursementType::Qurban, DisbursementType::Vendor]
            }
            Self::QurbanExecutionFee => &[DisbursementType::Qurban],
            Self::OperationalExpense => &[DisbursementType::Operational],
            Self::VendorPayment => &[DisbursementType::Vendor],
            Self::RevenueShareMitra
            | Self::RevenueShareFundraiser
            | Self::RevenueShareDeveloper => &[DisbursementType::RevenueShare],
        }
    }
}

impl fmt::Display for DisbursementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment details required to mark a disbursement as paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Amount actually transferred (whole rupiah).
    pub transferred_amount: Decimal,
    /// Bank/administrative fees on top of the transfer (whole rupiah, >= 0).
    pub additional_fees: Decimal,
    /// Date the transfer was executed.
    pub transfer_date: NaiveDate,
    /// URL of the uploaded transfer proof.
    pub transfer_proof_url: String,
    /// The platform bank account the transfer was made from.
    pub destination_bank_id: Uuid,
}

/// Input for creating a new disbursement.
#[derive(Debug, Clone)]
pub struct NewDisbursement {
    /// Coarse disbursement type.
    pub disbursement_type: DisbursementType,
    /// Fine-grained category.
    pub category: DisbursementCategory,
    /// Requested amount in whole rupiah.
    pub amount: Decimal,
    /// The campaign or period this disbursement draws from, when the
    /// category requires one.
    pub reference_id: Option<Uuid>,
    /// The recipient. Must be absent for the developer revenue-share
    /// category, whose payee is fixed by configuration.
    pub recipient: Option<RecipientRef>,
    /// Free-form note shown in the admin dashboard.
    pub description: Option<String>,
}

/// Optional edits applied to a draft disbursement.
///
/// Only drafts may be edited; type and category are immutable after
/// creation. Amount changes re-run the cap check, recipient and
/// reference changes re-derive the pool key.
#[derive(Debug, Clone, Default)]
pub struct DraftChanges {
    /// New amount in whole rupiah.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New campaign/period reference.
    pub reference_id: Option<Uuid>,
    /// New recipient.
    pub recipient: Option<RecipientRef>,
}

impl DraftChanges {
    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.reference_id.is_none()
            && self.recipient.is_none()
    }
}

/// Lifecycle action representing a state transition with audit data.
///
/// Each variant captures the action performed, the resulting status,
/// and the audit trail information (who, when, why).
#[derive(Debug, Clone)]
pub enum TransitionAction {
    /// Submit a draft disbursement for review.
    Submit {
        /// The new status after submission.
        new_status: DisbursementStatus,
        /// The actor who submitted the disbursement.
        submitted_by: Uuid,
        /// When the disbursement was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// Approve a submitted disbursement.
    Approve {
        /// The new status after approval.
        new_status: DisbursementStatus,
        /// The actor who approved the disbursement.
        approved_by: Uuid,
        /// When the disbursement was approved.
        approved_at: DateTime<Utc>,
    },
    /// Reject a submitted disbursement.
    Reject {
        /// The new status after rejection (Rejected, terminal).
        new_status: DisbursementStatus,
        /// The reason for rejection.
        rejection_reason: String,
    },
    /// Mark an approved disbursement as paid.
    Pay {
        /// The new status after payout.
        new_status: DisbursementStatus,
        /// The actor who executed the payout.
        disbursed_by: Uuid,
        /// When the payout was recorded.
        disbursed_at: DateTime<Utc>,
        /// The validated payment details.
        details: PaymentDetails,
    },
    /// Clone a rejected disbursement into a fresh draft.
    Resubmit {
        /// The status of the new record (Draft).
        new_status: DisbursementStatus,
        /// The actor creating the new draft.
        resubmitted_by: Uuid,
        /// When the new draft was created.
        resubmitted_at: DateTime<Utc>,
    },
}

impl TransitionAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> DisbursementStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Pay { new_status, .. }
            | Self::Resubmit { new_status, .. } => *new_status,
        }
    }
}

/// Formats the human-readable disbursement number.
///
/// The number is immutable once assigned: `DSB-YYYYMMDD-XXXXXX`, where
/// the suffix is taken from the record's UUID so concurrent creation
/// never needs a counter.
#[must_use]
pub fn disbursement_number(id: Uuid, on: NaiveDate) -> String {
    let simple = id.simple().to_string();
    let suffix = simple[..6].to_uppercase();
    format!("DSB-{}-{}", on.format("%Y%m%d"), suffix)
}
