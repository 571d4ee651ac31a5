//! Permission aggregation
//!
//! Flattens a role's direct grants and the grants of every role in its
//! closure into one set. Provenance is not kept.

use crate::hierarchy::ClosureTable;
use crate::types::{PermissionId, RoleGraph, RoleId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Role -> every permission it holds directly or by inheritance
pub type EffectivePermissionTable = HashMap<RoleId, HashSet<PermissionId>>;

/// Aggregate the effective permissions of `role`
///
/// Misses in either table count as empty contributions.
pub fn permissions_for(
    graph: &RoleGraph,
    closures: &ClosureTable,
    role: &str,
) -> HashSet<PermissionId> {
    let mut effective: HashSet<PermissionId> = graph.grants(role).iter().cloned().collect();

    if let Some(inherited) = closures.get(role) {
        for ancestor in inherited {
            effective.extend(graph.grants(ancestor).iter().cloned());
        }
    }

    effective
}

/// Aggregate effective permissions for every role keyed in the grant table
pub fn aggregate_all(graph: &RoleGraph, closures: &ClosureTable) -> EffectivePermissionTable {
    graph
        .permissions
        .keys()
        .map(|role| {
            let effective = permissions_for(graph, closures, role);
            debug!("Role '{}' resolves to {} permissions", role, effective.len());
            (role.clone(), effective)
        })
        .collect()
}
