//! Access control seam and a rule-table implementation

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "core.admin")]
    Admin,
    #[serde(rename = "core.create")]
    Create,
    #[serde(rename = "core.edit.state")]
    EditState,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Admin => "core.admin",
            Capability::Create => "core.create",
            Capability::EditState => "core.edit.state",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "core.admin" | "admin" => Ok(Capability::Admin),
            "core.create" | "create" => Ok(Capability::Create),
            "core.edit.state" | "edit.state" => Ok(Capability::EditState),
            other => bail!("Unknown capability '{}'", other),
        }
    }
}

/// Extra arguments for a capability check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Category the check is made on behalf of
    pub target_id: Option<i64>,
    /// Only the exact asset counts, no fallback to the extension asset
    pub strict: bool,
}

/// Permission checks for the current user
pub trait AccessControl: Send + Sync {
    /// `asset` of `None` checks the global (root) asset
    fn check(&self, capability: Capability, asset: Option<&str>, options: CheckOptions) -> bool;

    fn authorized_view_levels(&self) -> Vec<i64>;
}

/// Asset key of a category: `<extension>.category.<id>`
pub fn category_asset(extension: &str, id: i64) -> String {
    format!("{}.category.{}", extension, id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub capability: Capability,
    /// Exact asset key, an extension name, or a prefix ending in `*`
    pub asset: String,
}

/// Static permission table for one user, loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Super user: every check passes and access levels are not filtered
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "default_view_levels")]
    pub view_levels: Vec<i64>,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

fn default_view_levels() -> Vec<i64> {
    vec![1]
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            admin: false,
            view_levels: default_view_levels(),
            grants: Vec::new(),
        }
    }
}

impl AccessPolicy {
    pub fn grant(mut self, capability: Capability, asset: impl Into<String>) -> Self {
        self.grants.push(Grant {
            capability,
            asset: asset.into(),
        });
        self
    }

    /// `com_x.category.*` covers every asset below `com_x.category.`; a `*`
    /// anywhere else is taken literally
    fn matches(grant: &Grant, asset: &str) -> bool {
        match grant.asset.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('.') => asset.starts_with(prefix),
            _ => grant.asset == asset,
        }
    }
}

impl AccessControl for AccessPolicy {
    fn check(&self, capability: Capability, asset: Option<&str>, options: CheckOptions) -> bool {
        if self.admin {
            return true;
        }

        let asset = asset.unwrap_or("root");
        let relevant = || self.grants.iter().filter(|g| g.capability == capability);

        let mut allowed = relevant().any(|g| Self::matches(g, asset));

        // Non-strict checks inherit from the extension asset
        if !allowed && !options.strict {
            if let Some((extension, _)) = asset.split_once('.') {
                allowed = relevant().any(|g| g.asset == extension);
            }
        }

        log::debug!(
            "ACL {} on {} (target {:?}, strict {}): {}",
            capability,
            asset,
            options.target_id,
            options.strict,
            allowed
        );
        allowed
    }

    fn authorized_view_levels(&self) -> Vec<i64> {
        self.view_levels.clone()
    }
}
