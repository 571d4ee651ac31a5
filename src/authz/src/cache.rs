//! Resolution cache
//!
//! Holds role closures and effective permission sets. Built once from a
//! [`RoleGraph`] and read-only afterwards; a role never seen during the
//! build is simply absent.

use crate::hierarchy::closure::cyclic_roles;
use crate::hierarchy::{ClosureComputer, ClosureTable};
use crate::permissions::{aggregate_all, EffectivePermissionTable};
use crate::types::{PermissionId, RoleGraph, RoleId};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::info;

/// Precomputed closures and effective permissions
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    /// Closures for every hierarchy key
    closures: ClosureTable,

    /// Effective permissions for every grant-table key
    effective: EffectivePermissionTable,

    /// Roles inheriting from themselves through a cycle
    cyclic: HashSet<RoleId>,

    /// Time spent building
    build_time: Duration,
}

impl ResolutionCache {
    /// Build closures, then effective permissions
    pub fn build(graph: &RoleGraph, memoize_closures: bool) -> Self {
        let started = Instant::now();

        let closures = ClosureComputer::with_memoization(graph, memoize_closures).compute_all();
        let effective = aggregate_all(graph, &closures);
        let cyclic = cyclic_roles(&closures);
        let build_time = started.elapsed();

        info!(
            "Resolution cache built: {} closures, {} permission sets, {} cyclic roles in {:?}",
            closures.len(),
            effective.len(),
            cyclic.len(),
            build_time
        );

        Self {
            closures,
            effective,
            cyclic,
            build_time,
        }
    }

    /// Closure of `role`, if the role has a hierarchy entry
    pub fn closure(&self, role: &str) -> Option<&HashSet<RoleId>> {
        self.closures.get(role)
    }

    /// Effective permissions of `role`, if the role has a grant entry
    pub fn effective_permissions(&self, role: &str) -> Option<&HashSet<PermissionId>> {
        self.effective.get(role)
    }

    /// Whether `role`'s closure contains `other`
    pub fn inherits(&self, role: &str, other: &str) -> bool {
        self.closures
            .get(role)
            .is_some_and(|closure| closure.contains(other))
    }

    /// Whether `role`'s effective permissions contain `permission`
    pub fn grants(&self, role: &str, permission: &str) -> bool {
        self.effective
            .get(role)
            .is_some_and(|effective| effective.contains(permission))
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            closures: self.closures.len(),
            permission_sets: self.effective.len(),
            cyclic_roles: self.cyclic.len(),
            build_time: self.build_time,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Roles with a stored closure
    pub closures: usize,
    /// Roles with a stored effective permission set
    pub permission_sets: usize,
    /// Roles on a hierarchy cycle
    pub cyclic_roles: usize,
    /// Build duration
    pub build_time: Duration,
}
