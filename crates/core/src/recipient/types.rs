//! Recipient shapes for disbursement payouts.
//!
//! Directory-backed recipients arrive as a kind plus id and are resolved
//! to a snapshot at create time; manual recipients carry their payout
//! details inline. The snapshot persisted on the disbursement row is
//! what payout operators see, so later directory edits never change an
//! already-created disbursement.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The closed set of recipient kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    /// Internal staff member from the employee directory.
    Employee,
    /// Registered zakat recipient.
    Mustahiq,
    /// External vendor.
    Vendor,
    /// Campaign fundraiser.
    Fundraiser,
    /// Partner organisation.
    Mitra,
    /// Free-form payee supplied inline with bank details.
    Manual,
}

impl RecipientKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Mustahiq => "mustahiq",
            Self::Vendor => "vendor",
            Self::Fundraiser => "fundraiser",
            Self::Mitra => "mitra",
            Self::Manual => "manual",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "mustahiq" => Some(Self::Mustahiq),
            "vendor" => Some(Self::Vendor),
            "fundraiser" => Some(Self::Fundraiser),
            "mitra" => Some(Self::Mitra),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    /// Returns true for kinds resolved through the external directory.
    #[must_use]
    pub fn is_directory_backed(&self) -> bool {
        !matches!(self, Self::Manual)
    }
}

impl fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-supplied recipient reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecipientRef {
    /// Employee directory reference.
    Employee {
        /// Directory id.
        id: Uuid,
    },
    /// Mustahiq directory reference.
    Mustahiq {
        /// Directory id.
        id: Uuid,
    },
    /// Vendor directory reference.
    Vendor {
        /// Directory id.
        id: Uuid,
    },
    /// Fundraiser directory reference.
    Fundraiser {
        /// Directory id.
        id: Uuid,
    },
    /// Mitra directory reference.
    Mitra {
        /// Directory id.
        id: Uuid,
    },
    /// Inline payee with full bank details, no directory lookup.
    Manual {
        /// Payee name.
        name: String,
        /// Optional phone or email.
        contact: Option<String>,
        /// Bank name.
        bank_name: String,
        /// Bank account number.
        bank_account: String,
        /// Name on the bank account.
        bank_account_name: String,
    },
}

impl RecipientRef {
    /// Returns the kind tag of this reference.
    #[must_use]
    pub fn kind(&self) -> RecipientKind {
        match self {
            Self::Employee { .. } => RecipientKind::Employee,
            Self::Mustahiq { .. } => RecipientKind::Mustahiq,
            Self::Vendor { .. } => RecipientKind::Vendor,
            Self::Fundraiser { .. } => RecipientKind::Fundraiser,
            Self::Mitra { .. } => RecipientKind::Mitra,
            Self::Manual { .. } => RecipientKind::Manual,
        }
    }

    /// Returns the directory id for directory-backed kinds.
    #[must_use]
    pub fn directory_id(&self) -> Option<Uuid> {
        match self {
            Self::Employee { id }
            | Self::Mustahiq { id }
            | Self::Vendor { id }
            | Self::Fundraiser { id }
            | Self::Mitra { id } => Some(*id),
            Self::Manual { .. } => None,
        }
    }
}

/// Directory lookup result for a directory-backed recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecipient {
    /// Display name from the directory.
    pub name: String,
    /// Phone or email, when the directory has one.
    pub contact: Option<String>,
    /// Bank name on file.
    pub bank_name: Option<String>,
    /// Bank account number on file.
    pub bank_account: Option<String>,
    /// Name on the bank account.
    pub bank_account_name: Option<String>,
    /// Zakat recipient category label, only set for mustahiq entries.
    pub asnaf: Option<String>,
}

/// The recipient snapshot persisted on a disbursement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientSnapshot {
    /// Recipient kind.
    pub kind: RecipientKind,
    /// Directory id for directory-backed kinds, absent for manual.
    pub directory_id: Option<Uuid>,
    /// Payee name.
    pub name: String,
    /// Phone or email.
    pub contact: Option<String>,
    /// Bank name.
    pub bank_name: Option<String>,
    /// Bank account number.
    pub bank_account: Option<String>,
    /// Name on the bank account.
    pub bank_account_name: Option<String>,
    /// Zakat recipient category label, only set for mustahiq entries.
    pub asnaf: Option<String>,
}
