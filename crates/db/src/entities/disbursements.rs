//! `SeaORM` Entity for the disbursements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{
    DisbursementCategory, DisbursementStatus, DisbursementType, RecipientKind,
};

/// A disbursement request and its full lifecycle history.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "disbursements")]
pub struct Model {
    /// Primary key, UUID v7.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable number, unique and immutable.
    pub disbursement_number: String,
    /// Coarse type.
    pub disbursement_type: DisbursementType,
    /// Fine-grained category.
    pub category: DisbursementCategory,
    /// Canonical pool key; NULL for uncapped categories.
    pub pool_key: Option<String>,
    /// Requested amount, whole rupiah.
    pub amount: Decimal,
    /// Free-form note.
    pub description: Option<String>,
    /// Campaign/period reference, when the category requires one.
    pub reference_id: Option<Uuid>,
    /// Recipient snapshot captured at create time.
    pub recipient_kind: RecipientKind,
    /// Directory id, absent for manual recipients.
    pub recipient_directory_id: Option<Uuid>,
    /// Payee name.
    pub recipient_name: String,
    /// Payee contact.
    pub recipient_contact: Option<String>,
    /// Payee bank name.
    pub recipient_bank_name: Option<String>,
    /// Payee bank account number.
    pub recipient_bank_account: Option<String>,
    /// Name on the payee bank account.
    pub recipient_bank_account_name: Option<String>,
    /// Zakat recipient category label, mustahiq entries only.
    pub recipient_asnaf: Option<String>,
    /// Lifecycle status.
    pub status: DisbursementStatus,
    /// Creating actor.
    pub created_by: Uuid,
    /// Submission timestamp.
    pub submitted_at: Option<DateTimeWithTimeZone>,
    /// Submitting actor.
    pub submitted_by: Option<Uuid>,
    /// Approval timestamp.
    pub approved_at: Option<DateTimeWithTimeZone>,
    /// Approving actor.
    pub approved_by: Option<Uuid>,
    /// Rejection reason, set exactly when rejected.
    pub rejection_reason: Option<String>,
    /// Payout timestamp.
    pub disbursed_at: Option<DateTimeWithTimeZone>,
    /// Paying actor.
    pub disbursed_by: Option<Uuid>,
    /// Amount actually transferred.
    pub transferred_amount: Option<Decimal>,
    /// Fees on top of the transfer.
    pub additional_fees: Option<Decimal>,
    /// Date of the transfer.
    pub transfer_date: Option<Date>,
    /// Proof-of-transfer URL.
    pub transfer_proof_url: Option<String>,
    /// Platform bank account used for the transfer.
    pub destination_bank_id: Option<Uuid>,
    /// The rejected disbursement this record re-submits, if any.
    pub resubmitted_from: Option<Uuid>,
    /// Row creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Last row update time.
    pub updated_at: DateTimeWithTimeZone,
}

/// No foreign-key relations: actor, bank, and reference ids point at
/// collaborator-owned data outside this schema.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
