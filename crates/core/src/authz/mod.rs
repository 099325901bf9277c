//! Role model and the centralized authorization matrix.
//!
//! # Modules
//!
//! - `role` - Application roles and role sets
//! - `gate` - The authorization matrix for every engine operation

pub mod gate;
pub mod role;

#[cfg(test)]
mod gate_props;

pub use gate::{AuthorizationGate, ReviewAction};
pub use role::{Role, RoleSet};
