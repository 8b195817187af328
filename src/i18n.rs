//! Translation seam and a key/value catalog

use std::collections::HashMap;

/// Label of the zero-valued root option
pub const ROOT: &str = "JGLOBAL_ROOT";
/// Label of the root category when it is offered as a parent
pub const ROOT_PARENT: &str = "JGLOBAL_ROOT_PARENT";

pub trait Translator: Send + Sync {
    /// Unknown keys are returned unchanged
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    /// Catalog with the built-in English labels
    pub fn new() -> Self {
        let mut strings = HashMap::new();
        strings.insert(ROOT.to_string(), "Root".to_string());
        strings.insert(ROOT_PARENT.to_string(), "- No parent -".to_string());
        Self { strings }
    }

    /// Built-in labels overridden by `overrides`
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::new();
        catalog
            .strings
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
