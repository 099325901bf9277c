//! `SeaORM` Entity for the actor_roles snapshot table.
//!
//! Collaborator-owned mirror of the authentication service's role
//! grants. The engine reads role sets from it and never writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AppRole;

/// One role granted to an actor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor_roles")]
pub struct Model {
    /// The actor holding the role.
    #[sea_orm(primary_key, auto_increment = false)]
    pub actor_id: Uuid,
    /// The granted role.
    #[sea_orm(primary_key, auto_increment = false)]
    pub role: AppRole,
    /// When the grant was recorded.
    pub granted_at: DateTimeWithTimeZone,
}

/// Snapshot table; no relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
