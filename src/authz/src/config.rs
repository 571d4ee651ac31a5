//! Resolver configuration and role table loading
//!
//! Environment variables:
//! - `RBAC_MEMOIZE_CLOSURES` - Reuse finished closures during the build (default: true)
//! - `RBAC_MAX_ROLE_MODE` - `ordered` or `strict` (default: ordered)

use crate::error::{AuthzError, Result};
use crate::types::{PermissionContext, RoleGraph};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// How the most senior held role is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaxRoleMode {
    /// Left fold over held roles; unrelated roles resolve by list order
    #[default]
    Ordered,
    /// Reject held roles that are unrelated in the hierarchy
    Strict,
}

impl FromStr for MaxRoleMode {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Self::Ordered),
            "strict" => Ok(Self::Strict),
            other => Err(AuthzError::Config(format!(
                "Unknown max role mode '{}', expected 'ordered' or 'strict'",
                other
            ))),
        }
    }
}

/// Role resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Reuse finished closures while building the cache
    #[serde(default = "default_memoize")]
    pub memoize_closures: bool,

    /// Max-role selection used by `Authorizer::max_role_checked`
    #[serde(default)]
    pub max_role_mode: MaxRoleMode,
}

fn default_memoize() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            memoize_closures: default_memoize(),
            max_role_mode: MaxRoleMode::default(),
        }
    }
}

impl ResolverConfig {
    /// Read the configuration from the environment
    ///
    /// Unset variables keep their defaults; unparsable values are errors.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("RBAC_MEMOIZE_CLOSURES") {
            config.memoize_closures = parse_bool(&value).ok_or_else(|| {
                AuthzError::Config(format!("RBAC_MEMOIZE_CLOSURES: invalid boolean '{}'", value))
            })?;
        }

        if let Ok(value) = std::env::var("RBAC_MAX_ROLE_MODE") {
            config.max_role_mode = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl RoleGraph {
    /// Parse role tables from JSON
    ///
    /// ```json
    /// { "hierarchy": { "admin": ["manager"] }, "permissions": { "admin": ["user:delete"] } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let graph: RoleGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Load role tables from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl PermissionContext {
    /// Parse a principal context from JSON
    ///
    /// ```json
    /// { "roles": ["editor"], "permissions": ["custom:export"] }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a principal context from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert!(config.memoize_closures);
        assert_eq!(config.max_role_mode, MaxRoleMode::Ordered);
    }

    #[test]
    fn test_max_role_mode_parsing() {
        assert_eq!("strict".parse::<MaxRoleMode>().unwrap(), MaxRoleMode::Strict);
        assert_eq!(" Ordered ".parse::<MaxRoleMode>().unwrap(), MaxRoleMode::Ordered);
        assert!(matches!(
            "highest".parse::<MaxRoleMode>(),
            Err(AuthzError::Config(_))
        ));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ResolverConfig = serde_json::from_str(r#"{"max_role_mode": "strict"}"#).unwrap();
        assert!(config.memoize_closures);
        assert_eq!(config.max_role_mode, MaxRoleMode::Strict);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_graph_from_json() {
        let graph = RoleGraph::from_json_str(
            r#"{
                "hierarchy": { "admin": ["manager"], "manager": ["user"] },
                "permissions": { "user": ["product:read"] }
            }"#,
        )
        .unwrap();

        assert_eq!(graph.parents("admin"), ["manager".to_string()]);
        assert_eq!(graph.grants("user"), ["product:read".to_string()]);
    }

    #[test]
    fn test_graph_from_json_rejects_empty_names() {
        let result = RoleGraph::from_json_str(r#"{"hierarchy": {"admin": [""]}}"#);
        assert!(matches!(result, Err(AuthzError::InvalidInput(_))));

        let result = RoleGraph::from_json_str("not json");
        assert!(matches!(result, Err(AuthzError::Json(_))));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"roles": ["editor"], "permissions": ["custom:export"]}}"#).unwrap();

        let ctx = PermissionContext::from_path(file.path()).unwrap();
        assert_eq!(ctx.roles, vec!["editor"]);
        assert!(ctx.has_explicit_permission("custom:export"));

        let missing = RoleGraph::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(AuthzError::Io(_))));
    }
}
