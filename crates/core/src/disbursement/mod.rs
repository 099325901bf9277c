//! Disbursement lifecycle management.
//!
//! This module implements the disbursement state machine and its
//! supporting domain types.
//!
//! # Modules
//!
//! - `types` - Disbursement domain types (statuses, categories, actions)
//! - `error` - Engine error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::{EngineError, ErrorKind};
pub use service::TransitionEngine;
pub use types::{
    DisbursementCategory, DisbursementStatus, DisbursementType, DraftChanges, NewDisbursement,
    PaymentDetails, TransitionAction, disbursement_number,
};
