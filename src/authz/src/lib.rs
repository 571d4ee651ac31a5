//! # Rolegraph Authorization
//!
//! Role-hierarchy permission resolution.
//!
//! ## Features
//!
//! - **Hierarchy closure** over a parent-role mapping, safe against cycles
//! - **Flattened permission sets** per role, computed once at construction
//! - **Explicit grants** that bypass role resolution
//! - **Lock-free reads** of the immutable cache from any number of threads
//!
//! ## Example
//!
//! ```rust
//! use rolegraph_authz::{PermissionContext, RoleGraph, RoleResolver};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = RoleGraph::default()
//!         .with_parents("admin", ["manager"])
//!         .with_parents("manager", ["user"])
//!         .with_grants("admin", ["user:delete"])
//!         .with_grants("manager", ["product:create"])
//!         .with_grants("user", ["product:read"]);
//!
//!     let resolver = RoleResolver::new(&graph)?;
//!     let ctx = PermissionContext::with_roles(["admin"]);
//!
//!     assert!(resolver.has_permission(&ctx, "product:read"));
//!     assert!(resolver.has_permissions(&ctx, ["user:delete", "product:create"]));
//!     assert_eq!(resolver.max_role(&ctx), Some("admin"));
//!
//!     Ok(())
//! }
//! ```

pub mod types;
pub mod error;
pub mod config;
pub mod hierarchy;
pub mod permissions;
pub mod cache;
pub mod resolver;

// Re-export commonly used types
pub use types::{
    PermissionContext, PermissionId, RoleBasedPermissions, RoleGraph, RoleHierarchy, RoleId,
};
pub use cache::{CacheStats, ResolutionCache};
pub use config::{MaxRoleMode, ResolverConfig};
pub use error::{AuthzError, Result};
pub use resolver::{Authorizer, RoleResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
