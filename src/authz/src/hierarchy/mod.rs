//! Role hierarchy closure
//!
//! Expands the sparse parent-role mapping into, for every role, the full set
//! of roles it inherits from.
//!
//! # Features
//!
//! - **Cycle Safety**: Cycles terminate without pruning sibling branches
//! - **Iterative Traversal**: Explicit worklist, no recursion depth limit
//! - **Memoization**: Finished closures are reused by later roles
//!
//! # Example
//!
//! ```rust
//! use rolegraph_authz::hierarchy::ClosureComputer;
//! use rolegraph_authz::RoleGraph;
//!
//! let graph = RoleGraph::default()
//!     .with_parents("admin", ["manager"])
//!     .with_parents("manager", ["user"]);
//!
//! let mut computer = ClosureComputer::new(&graph);
//! let closure = computer.closure("admin");
//!
//! assert!(closure.contains("manager"));
//! assert!(closure.contains("user"));
//! assert!(computer.closure("user").is_empty());
//! ```

pub mod closure;

#[cfg(test)]
mod tests;

pub use closure::{ClosureComputer, ClosureTable};
