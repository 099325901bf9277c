//! Fund pool identity and available-funds accounting.
//!
//! # Modules
//!
//! - `key` - Pool key derivation and canonical encoding
//! - `ledger` - {collected, committed, available} arithmetic and the cap

pub mod key;
pub mod ledger;

#[cfg(test)]
mod ledger_props;

pub use key::{PoolKey, PoolReference};
pub use ledger::{PoolLedger, PoolSnapshot};
