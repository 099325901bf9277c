//! SQL adapters for the collaborator interfaces.
//!
//! Campaign totals, directory entries, and role grants are owned by
//! other platform services and mirrored into the snapshot tables by
//! their sync jobs. These adapters read the mirrors; nothing here
//! writes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::warn;
use uuid::Uuid;

use amanah_core::authz::{Role, RoleSet};
use amanah_core::disbursement::EngineError;
use amanah_core::pool::PoolKey;
use amanah_core::ports::{DirectoryResolver, PoolResolver, RoleDirectory};
use amanah_core::recipient::{RecipientKind, ResolvedRecipient};

use crate::entities::sea_orm_active_enums::AppRole;
use crate::entities::{actor_roles, directory_entries, pool_totals};
use crate::repositories::disbursement::{core_kind_to_db, map_db_err};

/// Reads collected pool figures from the `pool_totals` snapshot table.
///
/// Revenue-share entitlements arrive net of externally settled payouts,
/// so `collected - external_paid` is the figure the ledger caps against.
pub struct SqlPoolResolver {
    db: DatabaseConnection,
}

impl SqlPoolResolver {
    /// Creates a resolver over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PoolResolver for SqlPoolResolver {
    async fn collected_amount(&self, pool: PoolKey) -> Result<Decimal, EngineError> {
        let row = pool_totals::Entity::find_by_id(pool.canonical())
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(&e))?;
        match row {
            Some(total) => Ok(total.collected - total.external_paid),
            None => {
                warn!(pool = %pool, "no collected total recorded for pool");
                Ok(Decimal::ZERO)
            }
        }
    }
}

/// Resolves directory-backed recipients from the `directory_entries`
/// snapshot table.
pub struct SqlDirectoryResolver {
    db: DatabaseConnection,
}

impl SqlDirectoryResolver {
    /// Creates a resolver over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DirectoryResolver for SqlDirectoryResolver {
    async fn resolve_recipient(
        &self,
        kind: RecipientKind,
        id: Uuid,
    ) -> Result<Option<ResolvedRecipient>, EngineError> {
        if !kind.is_directory_backed() {
            return Ok(None);
        }
        let row = directory_entries::Entity::find_by_id((id, core_kind_to_db(kind)))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(&e))?;
        Ok(row.map(|entry| ResolvedRecipient {
            name: entry.name,
            contact: entry.contact,
            bank_name: entry.bank_name,
            bank_account: entry.bank_account,
            bank_account_name: entry.bank_account_name,
            asnaf: entry.asnaf,
        }))
    }
}

/// Reads role grants from the `actor_roles` snapshot table.
pub struct SqlRoleDirectory {
    db: DatabaseConnection,
}

impl SqlRoleDirectory {
    /// Creates a directory over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleDirectory for SqlRoleDirectory {
    async fn roles_for(&self, actor: Uuid) -> Result<RoleSet, EngineError> {
        let rows = actor_roles::Entity::find()
            .filter(actor_roles::Column::ActorId.eq(actor))
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(&e))?;
        Ok(rows
            .into_iter()
            .map(|row| db_role_to_core(&row.role))
            .collect())
    }
}

/// Maps a stored role grant to the engine role.
fn db_role_to_core(role: &AppRole) -> Role {
    match role {
        AppRole::Mitra => Role::Mitra,
        AppRole::Employee => Role::Employee,
        AppRole::ProgramCoordinator => Role::ProgramCoordinator,
        AppRole::AdminCampaign => Role::AdminCampaign,
        AppRole::AdminFinance => Role::AdminFinance,
        AppRole::SuperAdmin => Role::SuperAdmin,
    }
}
