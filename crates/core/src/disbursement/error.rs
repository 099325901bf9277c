//! Error types for disbursement lifecycle operations.
//!
//! This module defines all error types that can occur during
//! disbursement operations such as status transitions, fund checks,
//! and recipient validation.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::disbursement::types::{DisbursementCategory, DisbursementStatus, DisbursementType};
use crate::pool::PoolKey;
use crate::recipient::RecipientKind;

/// Coarse classification of engine errors.
///
/// `ConcurrencyConflict` is the only kind the service retries on its
/// own; everything else surfaces to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Authorization failure; not retriable without a role change.
    Forbidden,
    /// State precondition failure; not retriable without a state change.
    InvalidTransition,
    /// Pool cap violation; retriable with a reduced amount.
    FundsExceeded,
    /// Missing or malformed required fields; retriable after correction.
    ValidationFailed,
    /// Transaction serialization failure; safely retriable.
    ConcurrencyConflict,
    /// The referenced disbursement does not exist.
    NotFound,
    /// Storage or other infrastructure failure.
    Internal,
}

/// Errors that can occur during disbursement operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DisbursementStatus,
        /// The attempted target status.
        to: DisbursementStatus,
    },

    /// Attempted to edit a disbursement that is no longer a draft.
    #[error("Cannot modify disbursement in {0} status")]
    NotEditable(DisbursementStatus),

    /// Attempted to delete a disbursement in a non-deletable status.
    #[error("Cannot delete disbursement in {0} status")]
    NotDeletable(DisbursementStatus),

    /// Amount is not a positive whole-rupiah value.
    #[error("Amount {0} must be a positive whole rupiah value")]
    InvalidAmount(Decimal),

    /// Fee is negative or fractional.
    #[error("Fee {0} must be a non-negative whole rupiah value")]
    InvalidFee(Decimal),

    /// Category does not belong to the given disbursement type.
    #[error("Category {category} is not valid for disbursement type {disbursement_type}")]
    CategoryTypeMismatch {
        /// The requested category.
        category: DisbursementCategory,
        /// The requested disbursement type.
        disbursement_type: DisbursementType,
    },

    /// Category draws from a pool but no reference id was supplied.
    #[error("Category {0} requires a reference id")]
    ReferenceRequired(DisbursementCategory),

    /// Category requires a recipient but none was supplied.
    #[error("Category {0} requires a recipient")]
    RecipientRequired(DisbursementCategory),

    /// Recipient kind is not allowed for the category.
    #[error("Recipient kind {kind} is not allowed for category {category}")]
    RecipientKindNotAllowed {
        /// The requested category.
        category: DisbursementCategory,
        /// The supplied recipient kind.
        kind: RecipientKind,
    },

    /// Client supplied a recipient for the developer revenue share,
    /// whose payee is fixed by configuration.
    #[error("Recipient for developer revenue share is fixed by configuration")]
    RecipientFixedByConfig,

    /// Manual recipient payload is missing a required field.
    #[error("Manual recipient is missing required field: {0}")]
    ManualRecipientIncomplete(&'static str),

    /// Directory lookup produced no entry for the recipient.
    #[error("Recipient {kind} {id} not found in directory")]
    RecipientNotFound {
        /// The recipient kind that was looked up.
        kind: RecipientKind,
        /// The directory id that did not resolve.
        id: Uuid,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Payment details are missing a required field.
    #[error("Payment details are missing required field: {0}")]
    PaymentDetailsIncomplete(&'static str),

    /// Actor may not create a disbursement of this category.
    #[error("Actor {actor} is not authorized to create {category} disbursements")]
    NotAuthorizedToCreate {
        /// The actor who attempted the create.
        actor: Uuid,
        /// The requested category.
        category: DisbursementCategory,
    },

    /// Actor may not submit this disbursement.
    #[error("Actor {actor} is not authorized to submit this disbursement")]
    NotAuthorizedToSubmit {
        /// The actor who attempted the submit.
        actor: Uuid,
    },

    /// Actor lacks review rights (approve, reject, mark paid).
    #[error("Actor {actor} is not authorized to review disbursements")]
    NotAuthorizedToReview {
        /// The actor who attempted the review action.
        actor: Uuid,
    },

    /// Actor may not modify this disbursement.
    #[error("Actor {actor} is not authorized to modify this disbursement")]
    NotAuthorizedToModify {
        /// The actor who attempted the edit.
        actor: Uuid,
    },

    /// Actor may not delete this disbursement.
    #[error("Actor {actor} is not authorized to delete this disbursement")]
    NotAuthorizedToDelete {
        /// The actor who attempted the delete.
        actor: Uuid,
    },

    /// Self-service roles must name themselves as recipient.
    #[error("Actor {actor} may only create disbursements naming themselves as recipient")]
    RecipientMustBeSelf {
        /// The actor who attempted the create.
        actor: Uuid,
    },

    /// The record's creator may not approve it.
    #[error("Actor {actor} may not approve a disbursement they created")]
    SelfApprovalForbidden {
        /// The creating actor who attempted the approval.
        actor: Uuid,
    },

    /// Requested amount exceeds the pool's available funds.
    #[error("Requested amount {requested} exceeds available funds {available} for pool {pool}")]
    FundsExceeded {
        /// The pool the disbursement draws against.
        pool: PoolKey,
        /// The requested amount.
        requested: Decimal,
        /// The available funds at check time.
        available: Decimal,
    },

    /// Concurrent transactions collided; the operation may be retried.
    #[error("Concurrent update conflict, please retry")]
    ConcurrencyConflict,

    /// Disbursement not found.
    #[error("Disbursement {0} not found")]
    DisbursementNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl EngineError {
    /// Returns the coarse error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransition { .. } | Self::NotEditable(_) | Self::NotDeletable(_) => {
                ErrorKind::InvalidTransition
            }

            Self::InvalidAmount(_)
            | Self::InvalidFee(_)
            | Self::CategoryTypeMismatch { .. }
            | Self::ReferenceRequired(_)
            | Self::RecipientRequired(_)
            | Self::RecipientKindNotAllowed { .. }
            | Self::RecipientFixedByConfig
            | Self::ManualRecipientIncomplete(_)
            | Self::RecipientNotFound { .. }
            | Self::RejectionReasonRequired
            | Self::PaymentDetailsIncomplete(_) => ErrorKind::ValidationFailed,

            Self::NotAuthorizedToCreate { .. }
            | Self::NotAuthorizedToSubmit { .. }
            | Self::NotAuthorizedToReview { .. }
            | Self::NotAuthorizedToModify { .. }
            | Self::NotAuthorizedToDelete { .. }
            | Self::RecipientMustBeSelf { .. }
            | Self::SelfApprovalForbidden { .. } => ErrorKind::Forbidden,

            Self::FundsExceeded { .. } => ErrorKind::FundsExceeded,
            Self::ConcurrencyConflict => ErrorKind::ConcurrencyConflict,
            Self::DisbursementNotFound(_) => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidTransition | ErrorKind::ValidationFailed => 400,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::ConcurrencyConflict => 409,
            ErrorKind::FundsExceeded => 422,
            ErrorKind::Internal => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::NotDeletable(_) => "NOT_DELETABLE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidFee(_) => "INVALID_FEE",
            Self::CategoryTypeMismatch { .. } => "CATEGORY_TYPE_MISMATCH",
            Self::ReferenceRequired(_) => "REFERENCE_REQUIRED",
            Self::RecipientRequired(_) => "RECIPIENT_REQUIRED",
            Self::RecipientKindNotAllowed { .. } => "RECIPIENT_KIND_NOT_ALLOWED",
            Self::RecipientFixedByConfig => "RECIPIENT_FIXED_BY_CONFIG",
            Self::ManualRecipientIncomplete(_) => "MANUAL_RECIPIENT_INCOMPLETE",
            Self::RecipientNotFound { .. } => "RECIPIENT_NOT_FOUND",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::PaymentDetailsIncomplete(_) => "PAYMENT_DETAILS_INCOMPLETE",
            Self::NotAuthorizedToCreate { .. } => "NOT_AUTHORIZED_TO_CREATE",
            Self::NotAuthorizedToSubmit { .. } => "NOT_AUTHORIZED_TO_SUBMIT",
            Self::NotAuthorizedToReview { .. } => "NOT_AUTHORIZED_TO_REVIEW",
            Self::NotAuthorizedToModify { .. } => "NOT_AUTHORIZED_TO_MODIFY",
            Self::NotAuthorizedToDelete { .. } => "NOT_AUTHORIZED_TO_DELETE",
            Self::RecipientMustBeSelf { .. } => "RECIPIENT_MUST_BE_SELF",
            Self::SelfApprovalForbidden { .. } => "SELF_APPROVAL_FORBIDDEN",
            Self::FundsExceeded { .. } => "FUNDS_EXCEEDED",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            Self::DisbursementNotFound(_) => "DISBURSEMENT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}
