//! `SeaORM` Entity for the pool_totals snapshot table.
//!
//! Collaborator-owned: campaign/zakat/qurban/revenue-share services
//! upsert collected figures here; the engine only reads.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Collected (or entitled) funds per pool.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pool_totals")]
pub struct Model {
    /// Canonical pool key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub pool_key: String,
    /// Collected donations or gross entitlement.
    pub collected: Decimal,
    /// Payouts the external ledger already settled outside this engine.
    pub external_paid: Decimal,
    /// Last collaborator update.
    pub updated_at: DateTimeWithTimeZone,
}

/// Snapshot table; no relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
