use serde::{Deserialize, Serialize};

/// A named bundle of classes some provider makes available.
///
/// Built once per catalog refresh (or loaded from the cache) and read-only
/// afterwards; the resolver never mutates the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Suggested rule name (source modules) or external label (jars).
    pub name: String,

    /// Path fragment into the module source tree, or the resolved jar path.
    pub external_reference: String,

    /// Fully-qualified class names this dependency provides, in discovery
    /// order.
    pub resources: Vec<String>,
}

impl Dependency {
    /// True when this dependency provides `class_name` (exact string match;
    /// there is no package-level matching).
    pub fn provides(&self, class_name: &str) -> bool {
        self.resources.iter().any(|r| r == class_name)
    }
}
