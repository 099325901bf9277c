//! Application roles and role sets.
//!
//! Roles come from the authentication collaborator as a set per actor;
//! all grants are evaluated over the whole set and union across roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of application roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Partner organisation; self-service creation only.
    Mitra,
    /// Internal staff; self-service creation only.
    Employee,
    /// Campaign programme coordinator; self-service creation only.
    ProgramCoordinator,
    /// Campaign administrator; creates campaign disbursements for anyone.
    AdminCampaign,
    /// Finance administrator; full create and review rights.
    AdminFinance,
    /// Unrestricted administrator.
    SuperAdmin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mitra => "mitra",
            Self::Employee => "employee",
            Self::ProgramCoordinator => "program_coordinator",
            Self::AdminCampaign => "admin_campaign",
            Self::AdminFinance => "admin_finance",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mitra" => Some(Self::Mitra),
            "employee" => Some(Self::Employee),
            "program_coordinator" => Some(Self::ProgramCoordinator),
            "admin_campaign" => Some(Self::AdminCampaign),
            "admin_finance" => Some(Self::AdminFinance),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An actor's set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role to the set if not already present.
    pub fn insert(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    /// Returns true if the set contains the role.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true if the set contains any of the given roles.
    #[must_use]
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.contains(*r))
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterates over the roles in the set.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Review rights (approve, reject, mark paid) require a finance
    /// administrator or the super admin in the set.
    #[must_use]
    pub fn can_review(&self) -> bool {
        self.contains_any(&[Role::AdminFinance, Role::SuperAdmin])
    }

    /// Elevated rights for submit/delete/update on records created by
    /// someone else.
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        self.contains_any(&[Role::AdminFinance, Role::SuperAdmin])
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        let mut set = Self::new();
        for role in roles {
            set.insert(*role);
        }
        set
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self::from(roles.as_slice())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}
