//! `SeaORM` entity definitions.
//!
//! `disbursements` is the table this engine owns. `pool_totals`,
//! `directory_entries`, and `actor_roles` are collaborator-maintained
//! snapshot tables the engine treats as read-only.

pub mod actor_roles;
pub mod directory_entries;
pub mod disbursements;
pub mod pool_totals;
pub mod sea_orm_active_enums;
