//! Scenario tests for hierarchy closure
//!
//! Covers organizational hierarchies, diamonds, and cycles mixed with
//! acyclic branches.

use super::closure::{cyclic_roles, ClosureComputer};
use crate::types::{RoleGraph, RoleId};
use std::collections::HashSet;

fn set(roles: &[&str]) -> HashSet<RoleId> {
    roles.iter().map(|r| r.to_string()).collect()
}

fn sample_hierarchy() -> RoleGraph {
    RoleGraph::default()
        .with_parents("admin", ["manager"])
        .with_parents("manager", ["proof_reader", "editor", "sales_manager"])
        .with_parents("proof_reader", ["user"])
        .with_parents("editor", ["user"])
        .with_parents("sales_manager", ["user"])
        .with_parents("premium_user", ["user"])
}

// ============================================================================
// Acyclic Hierarchies
// ============================================================================

#[test]
fn test_sample_hierarchy_closures() {
    let graph = sample_hierarchy();
    let table = ClosureComputer::new(&graph).compute_all();

    assert_eq!(
        table["admin"],
        set(&["manager", "proof_reader", "editor", "sales_manager", "user"])
    );
    assert_eq!(
        table["manager"],
        set(&["proof_reader", "editor", "sales_manager", "user"])
    );
    assert_eq!(table["editor"], set(&["user"]));
    assert_eq!(table["premium_user"], set(&["user"]));
    assert!(!table["admin"].contains("premium_user"));
}

#[test]
fn test_value_only_roles_have_no_entry() {
    let graph = sample_hierarchy();
    let table = ClosureComputer::new(&graph).compute_all();

    // "user" only ever appears as a parent
    assert!(!table.contains_key("user"));
    assert_eq!(table.len(), graph.hierarchy.len());
}

#[test]
fn test_diamond_counts_shared_ancestor_once() {
    // tech_lead -> {manager, developer} -> employee
    let graph = RoleGraph::default()
        .with_parents("tech_lead", ["manager", "developer"])
        .with_parents("manager", ["employee"])
        .with_parents("developer", ["employee"]);

    let mut computer = ClosureComputer::new(&graph);
    assert_eq!(
        computer.closure("tech_lead"),
        set(&["manager", "developer", "employee"])
    );
}

#[test]
fn test_no_role_contains_itself_without_cycle() {
    let graph = sample_hierarchy();
    let table = ClosureComputer::new(&graph).compute_all();

    for (role, closure) in &table {
        assert!(!closure.contains(role), "{} should not inherit itself", role);
    }
    assert!(cyclic_roles(&table).is_empty());
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_three_role_cycle_terminates() {
    // A -> B -> C -> A
    let graph = RoleGraph::default()
        .with_parents("role_a", ["role_b"])
        .with_parents("role_b", ["role_c"])
        .with_parents("role_c", ["role_a"]);

    let table = ClosureComputer::new(&graph).compute_all();

    for role in ["role_a", "role_b", "role_c"] {
        assert_eq!(table[role], set(&["role_a", "role_b", "role_c"]));
    }
    assert_eq!(cyclic_roles(&table).len(), 3);
}

#[test]
fn test_cycle_does_not_prune_sibling_branch() {
    // root -> {looper, worker}; looper -> root; worker -> base
    let graph = RoleGraph::default()
        .with_parents("root", ["looper", "worker"])
        .with_parents("looper", ["root"])
        .with_parents("worker", ["base"]);

    let mut computer = ClosureComputer::with_memoization(&graph, false);

    assert_eq!(
        computer.closure("root"),
        set(&["root", "looper", "worker", "base"])
    );
    assert_eq!(
        computer.closure("looper"),
        set(&["root", "looper", "worker", "base"])
    );
    assert_eq!(computer.closure("worker"), set(&["base"]));
}

#[test]
fn test_partial_cycle() {
    // A -> B -> C -> B, and C -> D
    let graph = RoleGraph::default()
        .with_parents("role_a", ["role_b"])
        .with_parents("role_b", ["role_c"])
        .with_parents("role_c", ["role_b", "role_d"]);

    let table = ClosureComputer::new(&graph).compute_all();

    assert_eq!(table["role_a"], set(&["role_b", "role_c", "role_d"]));
    assert_eq!(table["role_b"], set(&["role_b", "role_c", "role_d"]));
    assert_eq!(
        cyclic_roles(&table),
        set(&["role_b", "role_c"])
    );
}

#[test]
fn test_self_loop_keeps_other_parents() {
    let graph = RoleGraph::default()
        .with_parents("auditor", ["auditor", "viewer"])
        .with_parents("viewer", ["guest"]);

    let table = ClosureComputer::new(&graph).compute_all();

    assert_eq!(table["auditor"], set(&["viewer", "guest"]));
    assert!(cyclic_roles(&table).is_empty());
}

#[test]
fn test_memoized_and_fresh_tables_agree_with_cycles() {
    let graph = RoleGraph::default()
        .with_parents("role_a", ["role_b", "role_x"])
        .with_parents("role_b", ["role_c"])
        .with_parents("role_c", ["role_a", "role_y"])
        .with_parents("role_x", ["role_y"])
        .with_parents("role_y", ["role_z"]);

    let memoized = ClosureComputer::new(&graph).compute_all();
    let fresh = ClosureComputer::with_memoization(&graph, false).compute_all();

    assert_eq!(memoized, fresh);
}

#[test]
fn test_long_chain_has_no_depth_limit() {
    let mut graph = RoleGraph::default();
    for i in 0..10_000 {
        graph = graph.with_parents(format!("level_{}", i), [format!("level_{}", i + 1)]);
    }

    let mut computer = ClosureComputer::with_memoization(&graph, false);
    assert_eq!(computer.closure("level_0").len(), 10_000);
}
