//! Core role resolution types

use crate::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Unique role identifier
pub type RoleId = String;

/// Unique permission identifier (e.g., "product:read"), compared by equality only
pub type PermissionId = String;

/// Role -> roles it directly inherits from, in declaration order
pub type RoleHierarchy = HashMap<RoleId, Vec<RoleId>>;

/// Role -> permissions granted directly to that role (inherited grants excluded)
pub type RoleBasedPermissions = HashMap<RoleId, Vec<PermissionId>>;

/// Static role tables a resolver is built from
///
/// The hierarchy may contain cycles. The two tables do not have to list the
/// same roles; a role missing from either table contributes nothing from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGraph {
    /// Direct parent roles
    #[serde(default)]
    pub hierarchy: RoleHierarchy,

    /// Direct grants
    #[serde(default)]
    pub permissions: RoleBasedPermissions,
}

impl RoleGraph {
    /// Create a role graph from both tables
    pub fn new(hierarchy: RoleHierarchy, permissions: RoleBasedPermissions) -> Self {
        Self {
            hierarchy,
            permissions,
        }
    }

    /// Declare the direct parents of `role`
    pub fn with_parents<I>(mut self, role: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.hierarchy
            .insert(role.into(), parents.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the direct grants of `role`
    pub fn with_grants<I>(mut self, role: impl Into<String>, grants: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.permissions
            .insert(role.into(), grants.into_iter().map(Into::into).collect());
        self
    }

    /// Direct parents of `role`, empty when the role has no hierarchy entry
    pub fn parents(&self, role: &str) -> &[RoleId] {
        self.hierarchy.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct grants of `role`, empty when the role has no grant entry
    pub fn grants(&self, role: &str) -> &[PermissionId] {
        self.permissions.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every role named anywhere in either table
    pub fn role_names(&self) -> HashSet<&str> {
        self.hierarchy
            .iter()
            .flat_map(|(role, parents)| {
                std::iter::once(role.as_str()).chain(parents.iter().map(String::as_str))
            })
            .chain(self.permissions.keys().map(String::as_str))
            .collect()
    }

    /// Validate the tables
    ///
    /// Rejects empty role or permission identifiers. Cycles are accepted.
    pub fn validate(&self) -> Result<()> {
        for (role, parents) in &self.hierarchy {
            if role.is_empty() {
                return Err(AuthzError::InvalidInput(
                    "Role hierarchy contains an empty role name".to_string(),
                ));
            }

            if parents.iter().any(String::is_empty) {
                return Err(AuthzError::InvalidInput(format!(
                    "Role '{}' has an empty parent role",
                    role
                )));
            }
        }

        for (role, grants) in &self.permissions {
            if role.is_empty() {
                return Err(AuthzError::InvalidInput(
                    "Permission table contains an empty role name".to_string(),
                ));
            }

            if grants.iter().any(String::is_empty) {
                return Err(AuthzError::InvalidInput(format!(
                    "Role '{}' grants an empty permission",
                    role
                )));
            }
        }

        Ok(())
    }
}

/// The principal under evaluation
///
/// Supplied by the host's authentication layer. Role order matters for
/// max-role selection; explicit permissions bypass role resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionContext {
    /// Roles held directly, in the order the host supplied them
    #[serde(default)]
    pub roles: Vec<RoleId>,

    /// Permissions held explicitly
    #[serde(default)]
    pub permissions: HashSet<PermissionId>,
}

impl PermissionContext {
    /// Create a context from held roles and explicit permissions
    pub fn new<R, P>(roles: R, permissions: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Context holding only the given roles
    pub fn with_roles<R>(roles: R) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self::new(roles, std::iter::empty::<String>())
    }

    /// Add a held role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Add an explicit permission
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Whether `role` is held directly
    pub fn holds_role(&self, role: &str) -> bool {
        self.roles.iter().any(|held| held == role)
    }

    /// Whether `permission` is held explicitly
    pub fn has_explicit_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
