//! Disbursement service orchestrating the lifecycle operations.
//!
//! Combines the authorization gate, the transition engine, the pool
//! ledger, and the store into the operations the HTTP layer exposes.
//! Every mutating operation runs in a single database transaction that
//! takes the pool advisory lock (when the row draws from a pool), locks
//! the row, recomputes the committed sum where the cap applies, and
//! writes. Serialization conflicts are retried a bounded number of
//! times before surfacing as `ConcurrencyConflict`.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use amanah_core::authz::{AuthorizationGate, ReviewAction};
use amanah_core::disbursement::{
    DisbursementCategory as CoreCategory, DraftChanges, EngineError, NewDisbursement,
    PaymentDetails, TransitionEngine, disbursement_number,
};
use amanah_core::pool::{PoolKey, PoolLedger, PoolSnapshot};
use amanah_core::ports::{DirectoryResolver, PoolResolver, RoleDirectory};
use amanah_core::recipient::{RecipientRef, RecipientRules, RecipientSnapshot};
use amanah_shared::EngineConfig;
use amanah_shared::types::pagination::{PageRequest, PageResponse};

use crate::entities::disbursements;
use crate::entities::sea_orm_active_enums::DisbursementStatus;
use crate::repositories::disbursement::{
    DisbursementFilter, DisbursementStore, core_category_to_db, core_kind_to_db, core_type_to_db,
    db_category_to_core, db_status_to_core, db_type_to_core, map_db_err, parse_pool_key,
};
use crate::resolvers::{SqlDirectoryResolver, SqlPoolResolver, SqlRoleDirectory};

/// Facade over the disbursement lifecycle.
///
/// Stateless apart from the connection pool and the injected
/// collaborator adapters; safe to share across request handlers.
pub struct DisbursementService {
    db: DatabaseConnection,
    pools: Arc<dyn PoolResolver>,
    directory: Arc<dyn DirectoryResolver>,
    roles: Arc<dyn RoleDirectory>,
    config: EngineConfig,
}

impl DisbursementService {
    /// Creates a service with explicit collaborator adapters.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        pools: Arc<dyn PoolResolver>,
        directory: Arc<dyn DirectoryResolver>,
        roles: Arc<dyn RoleDirectory>,
        config: EngineConfig,
    ) -> Self {
        Self {
            db,
            pools,
            directory,
            roles,
            config,
        }
    }

    /// Creates a service wired to the SQL adapters over the same
    /// connection pool.
    #[must_use]
    pub fn with_sql_resolvers(db: DatabaseConnection, config: EngineConfig) -> Self {
        let pools = Arc::new(SqlPoolResolver::new(db.clone()));
        let directory = Arc::new(SqlDirectoryResolver::new(db.clone()));
        let roles = Arc::new(SqlRoleDirectory::new(db.clone()));
        Self::new(db, pools, directory, roles, config)
    }

    // ========================================================================
    // Lifecycle operations
    // ========================================================================

    /// Creates a draft disbursement.
    ///
    /// Validates category/type compatibility, the creator's grant, the
    /// amount, and the recipient shape; resolves the recipient snapshot;
    /// derives the pool and fail-early checks its cap.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden`, `ValidationFailed`, or `FundsExceeded`
    /// errors as described in the module docs, or a database error.
    pub async fn create(
        &self,
        actor: Uuid,
        input: NewDisbursement,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("create", || self.create_once(actor, &input))
            .await
    }

    /// Applies edits to a draft disbursement.
    ///
    /// Only drafts are editable; type and category are immutable.
    /// Amount, reference, and recipient changes re-derive the pool and
    /// re-check the cap; recipient changes re-run the create gate.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` outside draft, plus the create-time
    /// validation errors.
    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        changes: DraftChanges,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("update", || self.update_once(actor, id, &changes))
            .await
    }

    /// Submits a draft for review; the amount starts counting against
    /// the pool.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside draft, `FundsExceeded` when
    /// the pool cannot absorb the amount, or `Forbidden` for actors who
    /// are neither the creator nor elevated.
    pub async fn submit(&self, actor: Uuid, id: Uuid) -> Result<disbursements::Model, EngineError> {
        self.retrying("submit", || self.submit_once(actor, id)).await
    }

    /// Approves a submitted disbursement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside submitted, `Forbidden`
    /// without review rights, and `SelfApprovalForbidden` for the
    /// record's creator.
    pub async fn approve(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("approve", || self.approve_once(actor, id))
            .await
    }

    /// Rejects a submitted disbursement; terminal, releases the
    /// commitment.
    ///
    /// # Errors
    ///
    /// Returns `RejectionReasonRequired` for a blank reason,
    /// `InvalidTransition` outside submitted, or `Forbidden` without
    /// review rights.
    pub async fn reject(
        &self,
        actor: Uuid,
        id: Uuid,
        reason: String,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("reject", || self.reject_once(actor, id, &reason))
            .await
    }

    /// Marks an approved disbursement as paid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside approved, `Forbidden`
    /// without review rights, or validation errors for malformed
    /// payment details.
    pub async fn mark_paid(
        &self,
        actor: Uuid,
        id: Uuid,
        details: PaymentDetails,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("mark_paid", || self.mark_paid_once(actor, id, &details))
            .await
    }

    /// Hard-deletes a disbursement in draft, submitted, or rejected
    /// status.
    ///
    /// # Errors
    ///
    /// Returns `NotDeletable` once approved or paid, or `Forbidden` for
    /// actors who are neither the creator nor elevated.
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), EngineError> {
        self.retrying("delete", || self.delete_once(actor, id)).await
    }

    /// Clones a rejected disbursement into a fresh draft linked via
    /// `resubmitted_from`. The rejected record never changes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when the record is not rejected, and
    /// the create-time authorization and cap errors for the clone.
    pub async fn resubmit(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        self.retrying("resubmit", || self.resubmit_once(actor, id))
            .await
    }

    /// Fetches a disbursement by id.
    ///
    /// # Errors
    ///
    /// Returns `DisbursementNotFound` if no row matches.
    pub async fn get(&self, id: Uuid) -> Result<disbursements::Model, EngineError> {
        DisbursementStore::find(&self.db, id).await
    }

    /// Lists disbursements matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(
        &self,
        filter: &DisbursementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<disbursements::Model>, EngineError> {
        DisbursementStore::list(&self.db, filter, page).await
    }

    /// Returns the advisory funds snapshot for a pool.
    ///
    /// The figures are for display; the authoritative cap check happens
    /// inside the submit transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if either read fails.
    pub async fn available_funds(&self, pool: PoolKey) -> Result<PoolSnapshot, EngineError> {
        let collected = self.pools.collected_amount(pool).await?;
        let committed = DisbursementStore::committed_total(&self.db, &pool, None).await?;
        Ok(PoolLedger::snapshot(collected, committed))
    }

    // ========================================================================
    // Single attempts
    // ========================================================================

    async fn create_once(
        &self,
        actor: Uuid,
        input: &NewDisbursement,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;

        if !input
            .category
            .compatible_types()
            .contains(&input.disbursement_type)
        {
            return Err(EngineError::CategoryTypeMismatch {
                category: input.category,
                disbursement_type: input.disbursement_type,
            });
        }

        let recipient_directory_id = input.recipient.as_ref().and_then(RecipientRef::directory_id);
        AuthorizationGate::authorize_create(
            actor,
            &roles,
            input.disbursement_type,
            input.category,
            recipient_directory_id,
        )?;
        TransitionEngine::validate_amount(input.amount)?;

        let snapshot = self
            .resolve_recipient_snapshot(input.category, input.recipient.as_ref())
            .await?;
        let pool = PoolKey::derive(input.category, input.reference_id, recipient_directory_id)?;
        let collected = self.collected_for(pool).await?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
            let committed = DisbursementStore::committed_total(&txn, &pool, None).await?;
            PoolLedger::check_capacity(pool, collected, committed, input.amount)?;
        }

        let id = Uuid::now_v7();
        let now = Utc::now();
        let row = disbursements::ActiveModel {
            id: Set(id),
            disbursement_number: Set(disbursement_number(id, now.date_naive())),
            disbursement_type: Set(core_type_to_db(input.disbursement_type)),
            category: Set(core_category_to_db(input.category)),
            pool_key: Set(pool.map(|p| p.canonical())),
            amount: Set(input.amount),
            description: Set(input.description.clone()),
            reference_id: Set(input.reference_id),
            recipient_kind: Set(core_kind_to_db(snapshot.kind)),
            recipient_directory_id: Set(snapshot.directory_id),
            recipient_name: Set(snapshot.name),
            recipient_contact: Set(snapshot.contact),
            recipient_bank_name: Set(snapshot.bank_name),
            recipient_bank_account: Set(snapshot.bank_account),
            recipient_bank_account_name: Set(snapshot.bank_account_name),
            recipient_asnaf: Set(snapshot.asnaf),
            status: Set(DisbursementStatus::Draft),
            created_by: Set(actor),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let created = row.insert(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(
            disbursement_id = %created.id,
            number = %created.disbursement_number,
            actor = %actor,
            category = %input.category,
            amount = %created.amount,
            "disbursement created"
        );
        Ok(created)
    }

    #[allow(clippy::too_many_lines)]
    async fn update_once(
        &self,
        actor: Uuid,
        id: Uuid,
        changes: &DraftChanges,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        AuthorizationGate::authorize_update(actor, &roles, preview.created_by)?;

        let current = db_status_to_core(&preview.status);
        if !current.is_editable() {
            return Err(EngineError::NotEditable(current));
        }
        if changes.is_empty() {
            return Ok(preview);
        }

        let category = db_category_to_core(&preview.category);
        let disbursement_type = db_type_to_core(&preview.disbursement_type);

        let new_amount = changes.amount.unwrap_or(preview.amount);
        TransitionEngine::validate_amount(new_amount)?;

        // A recipient change re-resolves the snapshot and re-runs the
        // create gate: self-service creators cannot edit a draft away
        // from themselves.
        let snapshot = match changes.recipient.as_ref() {
            Some(recipient) => {
                let snapshot = self
                    .resolve_recipient_snapshot(category, Some(recipient))
                    .await?;
                AuthorizationGate::authorize_create(
                    actor,
                    &roles,
                    disbursement_type,
                    category,
                    snapshot.directory_id,
                )?;
                Some(snapshot)
            }
            None => None,
        };

        let reference_id = changes.reference_id.or(preview.reference_id);
        let recipient_directory_id = match &snapshot {
            Some(snapshot) => snapshot.directory_id,
            None => preview.recipient_directory_id,
        };
        let pool = PoolKey::derive(category, reference_id, recipient_directory_id)?;
        // Description-only edits never move the cap.
        let needs_cap_check = changes.amount.is_some()
            || changes.reference_id.is_some()
            || changes.recipient.is_some();
        let cap_pool = if needs_cap_check { pool } else { None };
        let collected = self.collected_for(cap_pool).await?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = cap_pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;
        // The preview informed authorization and pool derivation; a row
        // that moved since then restarts the attempt.
        if row.updated_at != preview.updated_at {
            return Err(EngineError::ConcurrencyConflict);
        }

        if let Some(pool) = cap_pool {
            let committed = DisbursementStore::committed_total(&txn, &pool, None).await?;
            PoolLedger::check_capacity(pool, collected, committed, new_amount)?;
        }

        let mut active: disbursements::ActiveModel = row.into();
        active.amount = Set(new_amount);
        active.pool_key = Set(pool.map(|p| p.canonical()));
        active.reference_id = Set(reference_id);
        if let Some(description) = changes.description.clone() {
            active.description = Set(Some(description));
        }
        if let Some(snapshot) = snapshot {
            active.recipient_kind = Set(core_kind_to_db(snapshot.kind));
            active.recipient_directory_id = Set(snapshot.directory_id);
            active.recipient_name = Set(snapshot.name);
            active.recipient_contact = Set(snapshot.contact);
            active.recipient_bank_name = Set(snapshot.bank_name);
            active.recipient_bank_account = Set(snapshot.bank_account);
            active.recipient_bank_account_name = Set(snapshot.bank_account_name);
            active.recipient_asnaf = Set(snapshot.asnaf);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(disbursement_id = %id, actor = %actor, "draft disbursement updated");
        Ok(updated)
    }

    async fn submit_once(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        AuthorizationGate::authorize_submit(actor, &roles, preview.created_by)?;

        let pool = parse_pool_key(preview.pool_key.as_deref())?;
        let collected = self.collected_for(pool).await?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;
        // The advisory lock was taken for the previewed pool key; a row
        // that moved since then restarts the attempt.
        if row.updated_at != preview.updated_at {
            return Err(EngineError::ConcurrencyConflict);
        }

        let current = db_status_to_core(&row.status);
        let _action = TransitionEngine::submit(current, actor)?;

        if let Some(pool) = pool {
            let committed = DisbursementStore::committed_total(&txn, &pool, Some(id)).await?;
            PoolLedger::check_capacity(pool, collected, committed, row.amount)?;
        }

        let now = Utc::now().into();
        let mut active: disbursements::ActiveModel = row.into();
        active.status = Set(DisbursementStatus::Submitted);
        active.submitted_by = Set(Some(actor));
        active.submitted_at = Set(Some(now));
        active.updated_at = Set(now);

        let updated = active.update(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(
            disbursement_id = %id,
            actor = %actor,
            amount = %updated.amount,
            pool = updated.pool_key.as_deref().unwrap_or("-"),
            "disbursement submitted"
        );
        Ok(updated)
    }

    async fn approve_once(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        let pool = parse_pool_key(preview.pool_key.as_deref())?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;

        let current = db_status_to_core(&row.status);
        let _action = TransitionEngine::approve(current, actor)?;
        AuthorizationGate::authorize_review(actor, &roles, ReviewAction::Approve, row.created_by)?;

        let now = Utc::now().into();
        let mut active: disbursements::ActiveModel = row.into();
        active.status = Set(DisbursementStatus::Approved);
        active.approved_by = Set(Some(actor));
        active.approved_at = Set(Some(now));
        active.updated_at = Set(now);

        let updated = active.update(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(disbursement_id = %id, actor = %actor, "disbursement approved");
        Ok(updated)
    }

    async fn reject_once(
        &self,
        actor: Uuid,
        id: Uuid,
        reason: &str,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        let pool = parse_pool_key(preview.pool_key.as_deref())?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;

        let current = db_status_to_core(&row.status);
        let _action = TransitionEngine::reject(current, reason.to_string())?;
        AuthorizationGate::authorize_review(actor, &roles, ReviewAction::Reject, row.created_by)?;

        let now = Utc::now().into();
        let amount = row.amount;
        let mut active: disbursements::ActiveModel = row.into();
        active.status = Set(DisbursementStatus::Rejected);
        active.rejection_reason = Set(Some(reason.to_string()));
        active.updated_at = Set(now);

        let updated = active.update(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(
            disbursement_id = %id,
            actor = %actor,
            released_amount = %amount,
            "disbursement rejected"
        );
        Ok(updated)
    }

    async fn mark_paid_once(
        &self,
        actor: Uuid,
        id: Uuid,
        details: &PaymentDetails,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        let pool = parse_pool_key(preview.pool_key.as_deref())?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;

        let current = db_status_to_core(&row.status);
        let _action = TransitionEngine::pay(current, actor, details.clone())?;
        AuthorizationGate::authorize_review(actor, &roles, ReviewAction::MarkPaid, row.created_by)?;

        let now = Utc::now().into();
        let mut active: disbursements::ActiveModel = row.into();
        active.status = Set(DisbursementStatus::Paid);
        active.disbursed_by = Set(Some(actor));
        active.disbursed_at = Set(Some(now));
        active.transferred_amount = Set(Some(details.transferred_amount));
        active.additional_fees = Set(Some(details.additional_fees));
        active.transfer_date = Set(Some(details.transfer_date));
        active.transfer_proof_url = Set(Some(details.transfer_proof_url.clone()));
        active.destination_bank_id = Set(Some(details.destination_bank_id));
        active.updated_at = Set(now);

        let updated = active.update(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        // Fee postings feed the finance ledger through the log pipeline.
        info!(
            target: "fee_ledger",
            disbursement_id = %id,
            number = %updated.disbursement_number,
            transferred_amount = %details.transferred_amount,
            additional_fees = %details.additional_fees,
            transfer_date = %details.transfer_date,
            destination_bank_id = %details.destination_bank_id,
            "payout recorded"
        );
        info!(disbursement_id = %id, actor = %actor, "disbursement paid");
        Ok(updated)
    }

    async fn delete_once(&self, actor: Uuid, id: Uuid) -> Result<(), EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let preview = DisbursementStore::find(&self.db, id).await?;
        let pool = parse_pool_key(preview.pool_key.as_deref())?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
        }
        let row = DisbursementStore::find_for_update(&txn, id).await?;

        let current = db_status_to_core(&row.status);
        TransitionEngine::delete(current)?;
        AuthorizationGate::authorize_delete(actor, &roles, row.created_by)?;

        disbursements::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(
            disbursement_id = %id,
            actor = %actor,
            status = %current,
            "disbursement deleted"
        );
        Ok(())
    }

    async fn resubmit_once(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        let roles = self.roles.roles_for(actor).await?;
        let original = DisbursementStore::find(&self.db, id).await?;

        let current = db_status_to_core(&original.status);
        let _action = TransitionEngine::resubmit(current, actor)?;
        AuthorizationGate::authorize_create(
            actor,
            &roles,
            db_type_to_core(&original.disbursement_type),
            db_category_to_core(&original.category),
            original.recipient_directory_id,
        )?;

        let pool = parse_pool_key(original.pool_key.as_deref())?;
        let collected = self.collected_for(pool).await?;

        let txn = self.db.begin().await.map_err(|e| map_db_err(&e))?;
        if let Some(pool) = pool {
            DisbursementStore::acquire_pool_lock(&txn, &pool).await?;
            let committed = DisbursementStore::committed_total(&txn, &pool, None).await?;
            PoolLedger::check_capacity(pool, collected, committed, original.amount)?;
        }

        let new_id = Uuid::now_v7();
        let now = Utc::now();
        let clone = disbursements::ActiveModel {
            id: Set(new_id),
            disbursement_number: Set(disbursement_number(new_id, now.date_naive())),
            disbursement_type: Set(original.disbursement_type.clone()),
            category: Set(original.category.clone()),
            pool_key: Set(original.pool_key.clone()),
            amount: Set(original.amount),
            description: Set(original.description.clone()),
            reference_id: Set(original.reference_id),
            recipient_kind: Set(original.recipient_kind.clone()),
            recipient_directory_id: Set(original.recipient_directory_id),
            recipient_name: Set(original.recipient_name.clone()),
            recipient_contact: Set(original.recipient_contact.clone()),
            recipient_bank_name: Set(original.recipient_bank_name.clone()),
            recipient_bank_account: Set(original.recipient_bank_account.clone()),
            recipient_bank_account_name: Set(original.recipient_bank_account_name.clone()),
            recipient_asnaf: Set(original.recipient_asnaf.clone()),
            status: Set(DisbursementStatus::Draft),
            created_by: Set(actor),
            resubmitted_from: Set(Some(original.id)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let created = clone.insert(&txn).await.map_err(|e| map_db_err(&e))?;
        txn.commit().await.map_err(|e| map_db_err(&e))?;

        info!(
            disbursement_id = %created.id,
            resubmitted_from = %original.id,
            actor = %actor,
            "rejected disbursement cloned into a new draft"
        );
        Ok(created)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Runs one attempt of a mutating operation, retrying on
    /// serialization conflicts up to the configured bound.
    async fn retrying<T, Fut>(
        &self,
        operation: &'static str,
        attempt_fn: impl Fn() -> Fut,
    ) -> Result<T, EngineError>
    where
        Fut: Future<Output = Result<T, EngineError>>,
    {
        let mut attempt = 0;
        loop {
            match attempt_fn().await {
                Err(EngineError::ConcurrencyConflict)
                    if attempt < self.config.max_commit_retries =>
                {
                    attempt += 1;
                    warn!(operation, attempt, "serialization conflict, retrying");
                }
                other => return other,
            }
        }
    }

    /// Resolves the recipient payload into the snapshot persisted on
    /// the row, consulting the directory for directory-backed kinds.
    async fn resolve_recipient_snapshot(
        &self,
        category: CoreCategory,
        recipient: Option<&RecipientRef>,
    ) -> Result<RecipientSnapshot, EngineError> {
        let resolved = match recipient {
            Some(recipient) if recipient.kind().is_directory_backed() => {
                match recipient.directory_id() {
                    Some(directory_id) => {
                        self.directory
                            .resolve_recipient(recipient.kind(), directory_id)
                            .await?
                    }
                    None => None,
                }
            }
            _ => None,
        };
        RecipientRules::resolve(
            category,
            recipient,
            resolved,
            &self.config.developer_payee,
        )
    }

    async fn collected_for(&self, pool: Option<PoolKey>) -> Result<Decimal, EngineError> {
        match pool {
            Some(pool) => self.pools.collected_amount(pool).await,
            None => Ok(Decimal::ZERO),
        }
    }
}
