//! Recipient shapes and category-driven recipient validation.
//!
//! # Modules
//!
//! - `types` - Recipient kinds, references, and persisted snapshots
//! - `rules` - Category to recipient-kind matrix and resolution

pub mod rules;
pub mod types;

pub use rules::RecipientRules;
pub use types::{RecipientKind, RecipientRef, RecipientSnapshot, ResolvedRecipient};
