//! Role resolver and permission queries
//!
//! This module provides the [`RoleResolver`], which builds the resolution
//! cache once from the role tables, and the [`Authorizer`], a resolver bound
//! to one principal's [`PermissionContext`]. It uses:
//!
//! - **ClosureComputer**: For cycle-safe role inheritance
//! - **Permission aggregation**: For flattened per-role permission sets
//! - **Arc**: So one built cache can be shared across threads without locking
//!
//! # Example
//!
//! ```rust
//! use rolegraph_authz::{PermissionContext, RoleGraph, RoleResolver};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = RoleGraph::default()
//!     .with_parents("manager", ["user"])
//!     .with_grants("manager", ["product:create"])
//!     .with_grants("user", ["product:read"]);
//!
//! let resolver = RoleResolver::new(&graph)?;
//! let ctx = PermissionContext::with_roles(["manager"]);
//! let authorizer = resolver.authorizer(&ctx);
//!
//! assert!(authorizer.has_permission("product:read"));
//! assert!(authorizer.has_role("user"));
//! assert_eq!(authorizer.max_role(), Some("manager"));
//! # Ok(())
//! # }
//! ```

use crate::cache::{CacheStats, ResolutionCache};
use crate::config::{MaxRoleMode, ResolverConfig};
use crate::error::{AuthzError, Result};
use crate::types::{PermissionContext, PermissionId, RoleGraph, RoleId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Role resolver over a fixed role graph
///
/// The closures and effective permissions are computed once in the
/// constructor and never recomputed. A changed hierarchy needs a new resolver.
///
/// # Thread Safety
///
/// Cloning is cheap and all queries take `&self`; share it with `Arc` or by
/// cloning.
#[derive(Debug, Clone)]
pub struct RoleResolver {
    /// Precomputed closures and effective permissions
    cache: Arc<ResolutionCache>,

    /// Resolver configuration
    config: ResolverConfig,
}

impl RoleResolver {
    /// Create a resolver with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the role tables contain empty identifiers.
    pub fn new(graph: &RoleGraph) -> Result<Self> {
        Self::with_config(graph, ResolverConfig::default())
    }

    /// Create a resolver with custom settings
    pub fn with_config(graph: &RoleGraph, config: ResolverConfig) -> Result<Self> {
        graph.validate()?;

        let cache = ResolutionCache::build(graph, config.memoize_closures);

        Ok(Self {
            cache: Arc::new(cache),
            config,
        })
    }

    /// Bind the resolver to a principal
    pub fn authorizer<'a>(&'a self, context: &'a PermissionContext) -> Authorizer<'a> {
        Authorizer {
            cache: &self.cache,
            context,
            max_role_mode: self.config.max_role_mode,
        }
    }

    /// Check a single permission for `context`
    pub fn has_permission(&self, context: &PermissionContext, permission: &str) -> bool {
        self.authorizer(context).has_permission(permission)
    }

    /// Check that `context` holds every permission
    pub fn has_permissions<I, S>(&self, context: &PermissionContext, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.authorizer(context).has_permissions(permissions)
    }

    /// Check that `context` holds at least one permission
    pub fn has_any_permission<I, S>(&self, context: &PermissionContext, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.authorizer(context).has_any_permission(permissions)
    }

    /// Check a role for `context`, directly held or inherited
    pub fn has_role(&self, context: &PermissionContext, role: &str) -> bool {
        self.authorizer(context).has_role(role)
    }

    /// Most senior role held by `context`, see [`Authorizer::max_role`]
    pub fn max_role<'a>(&'a self, context: &'a PermissionContext) -> Option<&'a str> {
        self.authorizer(context).max_role()
    }

    /// Closure of `role`, if the role has a hierarchy entry
    pub fn closure(&self, role: &str) -> Option<&HashSet<RoleId>> {
        self.cache.closure(role)
    }

    /// Effective permissions of `role`, if the role has a grant entry
    pub fn effective_permissions(&self, role: &str) -> Option<&HashSet<PermissionId>> {
        self.cache.effective_permissions(role)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

/// A resolver bound to one principal
///
/// All operations are read-only and deterministic for a given cache and
/// context. Unknown roles and permissions answer `false`.
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'a> {
    cache: &'a ResolutionCache,
    context: &'a PermissionContext,
    max_role_mode: MaxRoleMode,
}

impl<'a> Authorizer<'a> {
    /// The bound principal
    pub fn context(&self) -> &'a PermissionContext {
        self.context
    }

    /// Check a single permission
    ///
    /// Explicit permissions are checked first and answer without consulting
    /// the role cache. Otherwise any held role whose effective permissions
    /// contain `permission` grants it.
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.context.has_explicit_permission(permission) {
            debug!("Permission '{}' granted explicitly", permission);
            return true;
        }

        self.context
            .roles
            .iter()
            .any(|role| self.cache.grants(role, permission))
    }

    /// Check that every permission is held (true for an empty list)
    pub fn has_permissions<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .all(|permission| self.has_permission(permission.as_ref()))
    }

    /// Check that at least one permission is held (false for an empty list)
    pub fn has_any_permission<I, S>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .any(|permission| self.has_permission(permission.as_ref()))
    }

    /// Check a role, directly held or inherited through any held role
    pub fn has_role(&self, role: &str) -> bool {
        self.context.holds_role(role)
            || self
                .context
                .roles
                .iter()
                .any(|held| self.cache.inherits(held, role))
    }

    /// Most senior held role
    ///
    /// Left fold over the held roles in context order: the current pick is
    /// kept when its closure contains the next role, otherwise the next role
    /// replaces it. For two roles unrelated in the hierarchy the later one
    /// in context order wins, so `[sales_manager, editor]` yields `editor`;
    /// see [`max_role_strict`](Self::max_role_strict) to reject such sets.
    ///
    /// Returns `None` when no role is held.
    pub fn max_role(&self) -> Option<&'a str> {
        let mut roles = self.context.roles.iter();
        let first = roles.next()?;

        let max = roles.fold(first, |current, candidate| {
            if self.cache.inherits(current, candidate) {
                current
            } else {
                candidate
            }
        });

        Some(max.as_str())
    }

    /// Most senior held role, requiring the held roles to be comparable
    ///
    /// # Errors
    ///
    /// Returns [`AuthzError::IncomparableRoles`] when the running pick and a
    /// later role do not inherit from one another.
    pub fn max_role_strict(&self) -> Result<Option<&'a str>> {
        let mut roles = self.context.roles.iter();
        let Some(first) = roles.next() else {
            return Ok(None);
        };

        let mut current = first;
        for candidate in roles {
            if candidate == current || self.cache.inherits(current, candidate) {
                continue;
            }

            if self.cache.inherits(candidate, current) {
                current = candidate;
                continue;
            }

            return Err(AuthzError::IncomparableRoles {
                first: current.clone(),
                second: candidate.clone(),
            });
        }

        Ok(Some(current.as_str()))
    }

    /// Most senior held role using the configured [`MaxRoleMode`]
    pub fn max_role_checked(&self) -> Result<Option<&'a str>> {
        match self.max_role_mode {
            MaxRoleMode::Ordered => Ok(self.max_role()),
            MaxRoleMode::Strict => self.max_role_strict(),
        }
    }

    /// Held roles plus every role they inherit
    pub fn inherited_roles(&self) -> HashSet<&'a str> {
        let mut roles: HashSet<&'a str> = HashSet::new();

        for held in &self.context.roles {
            roles.insert(held.as_str());
            if let Some(closure) = self.cache.closure(held) {
                roles.extend(closure.iter().map(String::as_str));
            }
        }

        roles
    }
}
