//! Core business logic for Amanah.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `disbursement` - Disbursement lifecycle state machine
//! - `authz` - Role-based authorization gate
//! - `pool` - Fund pool keys and availability arithmetic
//! - `recipient` - Recipient shapes and resolution rules
//! - `ports` - Collaborator interfaces implemented by the db crate

pub mod authz;
pub mod disbursement;
pub mod pool;
pub mod ports;
pub mod recipient;
