//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Disbursement lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "disbursement_status")]
pub enum DisbursementStatus {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Awaiting review; counts against its pool.
    #[sea_orm(string_value = "submitted")]
    Submitted,
    /// Approved, awaiting payout.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected, terminal.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Paid out, terminal.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Coarse disbursement type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "disbursement_type")]
pub enum DisbursementType {
    /// Campaign payout.
    #[sea_orm(string_value = "campaign")]
    Campaign,
    /// Zakat distribution.
    #[sea_orm(string_value = "zakat")]
    Zakat,
    /// Qurban purchase or execution.
    #[sea_orm(string_value = "qurban")]
    Qurban,
    /// Operational spend.
    #[sea_orm(string_value = "operational")]
    Operational,
    /// Vendor invoice.
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Revenue-share payout.
    #[sea_orm(string_value = "revenue_share")]
    RevenueShare,
}

/// Fine-grained disbursement category.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "disbursement_category")]
pub enum DisbursementCategory {
    /// Campaign funds to a beneficiary.
    #[sea_orm(string_value = "campaign_to_beneficiary")]
    CampaignToBeneficiary,
    /// Zakat to a mustahiq.
    #[sea_orm(string_value = "zakat_to_mustahiq")]
    ZakatToMustahiq,
    /// Cow purchase.
    #[sea_orm(string_value = "qurban_purchase_sapi")]
    QurbanPurchaseSapi,
    /// Goat purchase.
    #[sea_orm(string_value = "qurban_purchase_kambing")]
    QurbanPurchaseKambing,
    /// Qurban execution fee.
    #[sea_orm(string_value = "qurban_execution_fee")]
    QurbanExecutionFee,
    /// Operational expense.
    #[sea_orm(string_value = "operational_expense")]
    OperationalExpense,
    /// Vendor payment.
    #[sea_orm(string_value = "vendor_payment")]
    VendorPayment,
    /// Mitra revenue share.
    #[sea_orm(string_value = "revenue_share_mitra")]
    RevenueShareMitra,
    /// Fundraiser revenue share.
    #[sea_orm(string_value = "revenue_share_fundraiser")]
    RevenueShareFundraiser,
    /// Developer revenue share.
    #[sea_orm(string_value = "revenue_share_developer")]
    RevenueShareDeveloper,
}

/// Recipient kind for payouts and directory entries.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recipient_kind")]
pub enum RecipientKind {
    /// Internal staff member.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Registered zakat recipient.
    #[sea_orm(string_value = "mustahiq")]
    Mustahiq,
    /// External vendor.
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Campaign fundraiser.
    #[sea_orm(string_value = "fundraiser")]
    Fundraiser,
    /// Partner organisation.
    #[sea_orm(string_value = "mitra")]
    Mitra,
    /// Inline payee, disbursement rows only.
    #[sea_orm(string_value = "manual")]
    Manual,
}

/// Application role granted to an actor.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "app_role")]
pub enum AppRole {
    /// Partner organisation.
    #[sea_orm(string_value = "mitra")]
    Mitra,
    /// Internal staff.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Programme coordinator.
    #[sea_orm(string_value = "program_coordinator")]
    ProgramCoordinator,
    /// Campaign administrator.
    #[sea_orm(string_value = "admin_campaign")]
    AdminCampaign,
    /// Finance administrator.
    #[sea_orm(string_value = "admin_finance")]
    AdminFinance,
    /// Unrestricted administrator.
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}
