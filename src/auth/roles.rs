// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Administrator` - Full access, including catalog writes
/// - `Customer` - Can browse the catalog and edit existing records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Administrator,
    /// Normal customer account
    Customer,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            // Administrators can do anything
            (Role::Administrator, _) => true,
            // Customers can do Customer things
            (Role::Customer, Role::Customer) => true,
            _ => false,
        }
    }

    /// Parse a role from its claim string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "administrator" => Some(Role::Administrator),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Customer (least privilege for authenticated users).
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Administrator => write!(f, "administrator"),
            Role::Customer => write!(f, "customer"),
        }
    }
}
