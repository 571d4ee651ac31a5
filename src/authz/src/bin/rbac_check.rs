//! # Role Check
//!
//! Evaluates a principal against role tables and prints the decisions as JSON.
//!
//! ## Usage
//!
//! ```text
//! rbac-check <tables.json> <context.json> [permission...]
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG` - Log level (default: info)
//! - `RBAC_MEMOIZE_CLOSURES` - Reuse finished closures during the build (default: true)
//! - `RBAC_MAX_ROLE_MODE` - `ordered` or `strict` (default: ordered)

use anyhow::{bail, Context};
use rolegraph_authz::{Authorizer, PermissionContext, ResolverConfig, RoleGraph, RoleResolver};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(tables_path), Some(context_path)) = (args.next(), args.next()) else {
        bail!("usage: rbac-check <tables.json> <context.json> [permission...]");
    };
    let permissions: Vec<String> = args.collect();

    info!("Starting rbac-check v{}", rolegraph_authz::VERSION);

    let config = ResolverConfig::from_env().context("invalid resolver configuration")?;
    let graph = RoleGraph::from_path(&tables_path)
        .with_context(|| format!("failed to load role tables from {}", tables_path))?;
    let context = PermissionContext::from_path(&context_path)
        .with_context(|| format!("failed to load context from {}", context_path))?;

    let resolver = RoleResolver::with_config(&graph, config)?;
    let authorizer = resolver.authorizer(&context);

    let report = report(&authorizer, &permissions);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Decisions for `permissions` plus the max role, as printed by the binary
fn report(authorizer: &Authorizer<'_>, permissions: &[String]) -> Value {
    let decisions: serde_json::Map<String, Value> = permissions
        .iter()
        .map(|permission| (permission.clone(), json!(authorizer.has_permission(permission))))
        .collect();

    let max_role = match authorizer.max_role_checked() {
        Ok(role) => json!(role),
        Err(e) => json!({ "error": e.to_string() }),
    };

    json!({
        "roles": &authorizer.context().roles,
        "permissions": decisions,
        "has_all": authorizer.has_permissions(permissions),
        "has_any": authorizer.has_any_permission(permissions),
        "max_role": max_role,
    })
}
