//! Collaborator interfaces consumed by the engine.
//!
//! Pool totals, directory entries, and actor roles are owned by other
//! parts of the platform. The engine reads them through these traits;
//! the db crate provides the default adapters over the snapshot tables
//! those collaborators maintain.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::authz::RoleSet;
use crate::disbursement::error::EngineError;
use crate::pool::PoolKey;
use crate::recipient::{RecipientKind, ResolvedRecipient};

/// Resolves the collected (or net entitled) figure for a pool.
///
/// For campaign/zakat/qurban pools this is the collected total; for
/// revenue-share pools it is the entitlement net of any payouts the
/// external ledger already tracks. A pool with no recorded total
/// resolves to zero, which fails capacity checks closed.
#[async_trait]
pub trait PoolResolver: Send + Sync {
    /// Returns the funds collected into the pool.
    async fn collected_amount(&self, pool: PoolKey) -> Result<Decimal, EngineError>;
}

/// Resolves directory-backed recipients to payout snapshots.
#[async_trait]
pub trait DirectoryResolver: Send + Sync {
    /// Looks up a directory entry; `None` when the id is unknown for
    /// the kind.
    async fn resolve_recipient(
        &self,
        kind: RecipientKind,
        id: Uuid,
    ) -> Result<Option<ResolvedRecipient>, EngineError>;
}

/// Resolves an actor's role set from the authentication collaborator.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Returns the actor's roles; an unknown actor yields an empty set,
    /// which every authorization check refuses.
    async fn roles_for(&self, actor: Uuid) -> Result<RoleSet, EngineError>;
}
