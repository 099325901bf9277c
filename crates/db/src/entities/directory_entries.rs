//! `SeaORM` Entity for the directory_entries snapshot table.
//!
//! Collaborator-owned mirror of the employee/mustahiq/vendor/fundraiser/
//! mitra directories, keyed by (id, kind). The engine resolves recipient
//! snapshots from it and never writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RecipientKind;

/// One directory entry for a payable party.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "directory_entries")]
pub struct Model {
    /// Directory id within the kind.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Which directory the entry belongs to; never manual.
    #[sea_orm(primary_key, auto_increment = false)]
    pub kind: RecipientKind,
    /// Display name.
    pub name: String,
    /// Phone or email.
    pub contact: Option<String>,
    /// Bank name on file.
    pub bank_name: Option<String>,
    /// Bank account number on file.
    pub bank_account: Option<String>,
    /// Name on the bank account.
    pub bank_account_name: Option<String>,
    /// Zakat recipient category label, mustahiq entries only.
    pub asnaf: Option<String>,
    /// Last collaborator update.
    pub updated_at: DateTimeWithTimeZone,
}

/// Snapshot table; no relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
