//! Transitive closure over the role hierarchy
//!
//! The closure of a role is every role reachable by following one or more
//! parent edges. A role lies in its own closure only when a cycle through at
//! least one other role leads back to it; direct self-edges are ignored.

use crate::types::{RoleGraph, RoleId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Role -> every role it transitively inherits from
pub type ClosureTable = HashMap<RoleId, HashSet<RoleId>>;

/// Computes role closures for a fixed role graph
///
/// Each top-level [`closure`](Self::closure) call owns its own visited set,
/// so a cycle found on one branch never hides roles reached through another.
/// Only completed top-level closures are memoized.
#[derive(Debug)]
pub struct ClosureComputer<'a> {
    /// Role tables being expanded
    graph: &'a RoleGraph,

    /// Completed closures keyed by role
    memo: HashMap<RoleId, HashSet<RoleId>>,

    /// Reuse completed closures across calls
    memoize: bool,
}

impl<'a> ClosureComputer<'a> {
    /// Create a computer with memoization enabled
    pub fn new(graph: &'a RoleGraph) -> Self {
        Self::with_memoization(graph, true)
    }

    /// Create a computer, choosing whether completed closures are reused
    pub fn with_memoization(graph: &'a RoleGraph, memoize: bool) -> Self {
        Self {
            graph,
            memo: HashMap::new(),
            memoize,
        }
    }

    /// Compute the closure of `role`
    ///
    /// Returns the empty set for roles without a hierarchy entry.
    ///
    /// # Algorithm
    ///
    /// Depth-first worklist seeded with the role's direct parents:
    /// 1. Pop a role; skip it if already collected
    /// 2. If its closure is memoized, merge that closure instead of expanding
    /// 3. Otherwise push its parents, ignoring self-edges
    ///
    /// Every role and edge is visited at most once per call.
    pub fn closure(&mut self, role: &str) -> HashSet<RoleId> {
        if let Some(done) = self.memo.get(role) {
            return done.clone();
        }

        let graph = self.graph;
        let mut closure: HashSet<RoleId> = HashSet::new();
        let mut stack: Vec<&str> = graph
            .parents(role)
            .iter()
            .filter(|parent| parent.as_str() != role)
            .map(String::as_str)
            .collect();

        while let Some(current) = stack.pop() {
            if !closure.insert(current.to_string()) {
                continue;
            }

            if let Some(done) = self.memo.get(current) {
                closure.extend(done.iter().cloned());
                continue;
            }

            for parent in graph.parents(current) {
                if parent != current && !closure.contains(parent) {
                    stack.push(parent);
                }
            }
        }

        if self.memoize {
            self.memo.insert(role.to_string(), closure.clone());
        }

        closure
    }

    /// Compute the closure of every role keyed in the hierarchy
    pub fn compute_all(&mut self) -> ClosureTable {
        let graph = self.graph;
        let mut table = ClosureTable::with_capacity(graph.hierarchy.len());

        for (role, parents) in &graph.hierarchy {
            if parents.iter().any(|parent| parent == role) {
                warn!("Ignoring self-inheritance edge on role '{}'", role);
            }

            let closure = self.closure(role);
            debug!("Role '{}' inherits {} roles", role, closure.len());
            table.insert(role.clone(), closure);
        }

        let cyclic = cyclic_roles(&table);
        if !cyclic.is_empty() {
            let mut names: Vec<&str> = cyclic.iter().map(String::as_str).collect();
            names.sort_unstable();
            warn!("Role hierarchy contains cycles through: {}", names.join(", "));
        }

        table
    }

    /// Number of memoized closures
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}

/// Roles that appear in their own closure
pub fn cyclic_roles(table: &ClosureTable) -> HashSet<RoleId> {
    table
        .iter()
        .filter(|(role, closure)| closure.contains(role.as_str()))
        .map(|(role, _)| role.clone())
        .collect()
}
