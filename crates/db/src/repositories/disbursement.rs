//! Persistence queries for disbursement rows.
//!
//! `DisbursementStore` is stateless; every function is generic over the
//! connection so the service can run the same query inside or outside a
//! transaction. Writes stay in the service, which owns transaction
//! boundaries and audit fields.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RuntimeErr, Select,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use amanah_core::disbursement::{
    DisbursementCategory as CoreCategory, DisbursementStatus as CoreStatus,
    DisbursementType as CoreType, EngineError,
};
use amanah_core::pool::PoolKey;
use amanah_core::recipient::RecipientKind as CoreKind;
use amanah_shared::types::pagination::{PageRequest, PageResponse};

use crate::entities::disbursements;
use crate::entities::sea_orm_active_enums::{
    DisbursementCategory, DisbursementStatus, DisbursementType, RecipientKind,
};

/// Filters for listing disbursements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisbursementFilter {
    /// Only rows in this status.
    pub status: Option<CoreStatus>,
    /// Only rows of this type.
    pub disbursement_type: Option<CoreType>,
    /// Only rows in this category.
    pub category: Option<CoreCategory>,
    /// Only rows created by this actor.
    pub created_by: Option<Uuid>,
    /// Only rows drawing from this campaign or period.
    pub reference_id: Option<Uuid>,
}

/// Stateless persistence queries for disbursement rows.
pub struct DisbursementStore;

impl DisbursementStore {
    /// Fetches a disbursement by id.
    ///
    /// # Errors
    ///
    /// Returns `DisbursementNotFound` if no row matches.
    pub async fn find<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        disbursements::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| map_db_err(&e))?
            .ok_or(EngineError::DisbursementNotFound(id))
    }

    /// Fetches a disbursement by id with `FOR UPDATE`, serializing
    /// transitions per row.
    ///
    /// # Errors
    ///
    /// Returns `DisbursementNotFound` if no row matches.
    pub async fn find_for_update(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<disbursements::Model, EngineError> {
        disbursements::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(|e| map_db_err(&e))?
            .ok_or(EngineError::DisbursementNotFound(id))
    }

    /// Takes the transaction-scoped advisory lock for a pool.
    ///
    /// Mutating operations that involve a pool take this lock before any
    /// row lock. One fixed acquisition order, pool then row, keeps
    /// concurrent submits against the same pool serial.
    ///
    /// # Errors
    ///
    /// Returns a database error if the lock statement fails.
    pub async fn acquire_pool_lock(
        txn: &DatabaseTransaction,
        pool: &PoolKey,
    ) -> Result<(), EngineError> {
        let key = pool_lock_key(pool);
        txn.execute_unprepared(&format!("SELECT pg_advisory_xact_lock({key})"))
            .await
            .map_err(|e| map_db_err(&e))?;
        Ok(())
    }

    /// Sums the amounts committed against a pool.
    ///
    /// Committed rows are those in submitted, approved, or paid status;
    /// drafts and rejected rows never count. `exclude` removes one row
    /// from the sum, used when re-checking a row's own submission.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn committed_total<C: ConnectionTrait>(
        conn: &C,
        pool: &PoolKey,
        exclude: Option<Uuid>,
    ) -> Result<Decimal, EngineError> {
        #[derive(FromQueryResult)]
        struct AmountSum {
            total: Option<Decimal>,
        }

        let mut query = disbursements::Entity::find()
            .select_only()
            .column_as(disbursements::Column::Amount.sum(), "total")
            .filter(disbursements::Column::PoolKey.eq(pool.canonical()))
            .filter(disbursements::Column::Status.is_in([
                DisbursementStatus::Submitted,
                DisbursementStatus::Approved,
                DisbursementStatus::Paid,
            ]));
        if let Some(exclude) = exclude {
            query = query.filter(disbursements::Column::Id.ne(exclude));
        }

        let row = query
            .into_model::<AmountSum>()
            .one(conn)
            .await
            .map_err(|e| map_db_err(&e))?;

        Ok(row.and_then(|r| r.total).unwrap_or(Decimal::ZERO))
    }

    /// Lists disbursements matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list<C: ConnectionTrait>(
        conn: &C,
        filter: &DisbursementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<disbursements::Model>, EngineError> {
        let total = apply_filter(disbursements::Entity::find(), filter)
            .count(conn)
            .await
            .map_err(|e| map_db_err(&e))?;

        let data = apply_filter(disbursements::Entity::find(), filter)
            .order_by_desc(disbursements::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(conn)
            .await
            .map_err(|e| map_db_err(&e))?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}

fn apply_filter(
    query: Select<disbursements::Entity>,
    filter: &DisbursementFilter,
) -> Select<disbursements::Entity> {
    let mut query = query;
    if let Some(status) = filter.status {
        query = query.filter(disbursements::Column::Status.eq(core_status_to_db(status)));
    }
    if let Some(disbursement_type) = filter.disbursement_type {
        query = query.filter(
            disbursements::Column::DisbursementType.eq(core_type_to_db(disbursement_type)),
        );
    }
    if let Some(category) = filter.category {
        query = query.filter(disbursements::Column::Category.eq(core_category_to_db(category)));
    }
    if let Some(created_by) = filter.created_by {
        query = query.filter(disbursements::Column::CreatedBy.eq(created_by));
    }
    if let Some(reference_id) = filter.reference_id {
        query = query.filter(disbursements::Column::ReferenceId.eq(reference_id));
    }
    query
}

/// Derives the 64-bit advisory-lock key from the canonical pool key.
fn pool_lock_key(pool: &PoolKey) -> i64 {
    let digest = Sha256::digest(pool.canonical().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(prefix)
}

/// Parses the canonical pool key stored on a row.
///
/// A stored key that no longer parses means the row predates a schema
/// change it should not have survived; that surfaces as a database
/// error, never a panic.
pub(crate) fn parse_pool_key(raw: Option<&str>) -> Result<Option<PoolKey>, EngineError> {
    match raw {
        None => Ok(None),
        Some(raw) => PoolKey::parse(raw)
            .map(Some)
            .ok_or_else(|| EngineError::Database(format!("malformed pool key on row: {raw}"))),
    }
}

/// Maps a `SeaORM` error into the engine's error type.
///
/// Serialization and deadlock failures (SQLSTATE 40001/40P01) become
/// `ConcurrencyConflict`, which the service retries a bounded number of
/// times.
pub(crate) fn map_db_err(err: &DbErr) -> EngineError {
    if is_serialization_failure(err) {
        return EngineError::ConcurrencyConflict;
    }
    EngineError::Database(err.to_string())
}

fn is_serialization_failure(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Conn(runtime) | DbErr::Exec(runtime) | DbErr::Query(runtime) => runtime,
        _ => return false,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db_err)) => {
            matches!(db_err.code().as_deref(), Some("40001" | "40P01"))
        }
        _ => false,
    }
}

// ============================================================================
// Conversion helpers
// ============================================================================

/// Converts the database status to the core status.
pub(crate) fn db_status_to_core(status: &DisbursementStatus) -> CoreStatus {
    match status {
        DisbursementStatus::Draft => CoreStatus::Draft,
        DisbursementStatus::Submitted => CoreStatus::Submitted,
        DisbursementStatus::Approved => CoreStatus::Approved,
        DisbursementStatus::Rejected => CoreStatus::Rejected,
        DisbursementStatus::Paid => CoreStatus::Paid,
    }
}

/// Converts the core status to the database status.
pub(crate) fn core_status_to_db(status: CoreStatus) -> DisbursementStatus {
    match status {
        CoreStatus::Draft => DisbursementStatus::Draft,
        CoreStatus::Submitted => DisbursementStatus::Submitted,
        CoreStatus::Approved => DisbursementStatus::Approved,
        CoreStatus::Rejected => DisbursementStatus::Rejected,
        CoreStatus::Paid => DisbursementStatus::Paid,
    }
}

/// Converts the database type to the core type.
pub(crate) fn db_type_to_core(disbursement_type: &DisbursementType) -> CoreType {
    match disbursement_type {
        DisbursementType::Campaign => CoreType::Campaign,
        DisbursementType::Zakat => CoreType::Zakat,
        DisbursementType::Qurban => CoreType::Qurban,
        DisbursementType::Operational => CoreType::Operational,
        DisbursementType::Vendor => CoreType::Vendor,
        DisbursementType::RevenueShare => CoreType::RevenueShare,
    }
}

/// Converts the core type to the database type.
pub(crate) fn core_type_to_db(disbursement_type: CoreType) -> DisbursementType {
    match disbursement_type {
        CoreType::Campaign => DisbursementType::Campaign,
        CoreType::Zakat => DisbursementType::Zakat,
        CoreType::Qurban => DisbursementType::Qurban,
        CoreType::Operational => DisbursementType::Operational,
        CoreType::Vendor => DisbursementType::Vendor,
        CoreType::RevenueShare => DisbursementType::RevenueShare,
    }
}

/// Converts the database category to the core category.
pub(crate) fn db_category_to_core(category: &DisbursementCategory) -> CoreCategory {
    match category {
        DisbursementCategory::CampaignToBeneficiary => CoreCategory::CampaignToBeneficiary,
        DisbursementCategory::ZakatToMustahiq => CoreCategory::ZakatToMustahiq,
        DisbursementCategory::QurbanPurchaseSapi => CoreCategory::QurbanPurchaseSapi,
        DisbursementCategory::QurbanPurchaseKambing => CoreCategory::QurbanPurchaseKambing,
        DisbursementCategory::QurbanExecutionFee => CoreCategory::QurbanExecutionFee,
        DisbursementCategory::OperationalExpense => CoreCategory::OperationalExpense,
        DisbursementCategory::VendorPayment => CoreCategory::VendorPayment,
        DisbursementCategory::RevenueShareMitra => CoreCategory::RevenueShareMitra,
        DisbursementCategory::RevenueShareFundraiser => CoreCategory::RevenueShareFundraiser,
        DisbursementCategory::RevenueShareDeveloper => CoreCategory::RevenueShareDeveloper,
    }
}

/// Converts the core category to the database category.
pub(crate) fn core_category_to_db(category: CoreCategory) -> DisbursementCategory {
    match category {
        CoreCategory::CampaignToBeneficiary => DisbursementCategory::CampaignToBeneficiary,
        CoreCategory::ZakatToMustahiq => DisbursementCategory::ZakatToMustahiq,
        CoreCategory::QurbanPurchaseSapi => DisbursementCategory::QurbanPurchaseSapi,
        CoreCategory::QurbanPurchaseKambing => DisbursementCategory::QurbanPurchaseKambing,
        CoreCategory::QurbanExecutionFee => DisbursementCategory::QurbanExecutionFee,
        CoreCategory::OperationalExpense => DisbursementCategory::OperationalExpense,
        CoreCategory::VendorPayment => DisbursementCategory::VendorPayment,
        CoreCategory::RevenueShareMitra => DisbursementCategory::RevenueShareMitra,
        CoreCategory::RevenueShareFundraiser => DisbursementCategory::RevenueShareFundraiser,
        CoreCategory::RevenueShareDeveloper => DisbursementCategory::RevenueShareDeveloper,
    }
}

/// Converts the core recipient kind to the database kind.
pub(crate) fn core_kind_to_db(kind: CoreKind) -> RecipientKind {
    match kind {
        CoreKind::Employee => RecipientKind::Employee,
        CoreKind::Mustahiq => RecipientKind::Mustahiq,
        CoreKind::Vendor => RecipientKind::Vendor,
        CoreKind::Fundraiser => RecipientKind::Fundraiser,
        CoreKind::Mitra => RecipientKind::Mitra,
        CoreKind::Manual => RecipientKind::Manual,
    }
}
