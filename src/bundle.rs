use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Package names already exported at bundle scope
    #[serde(default)]
    pub exports: HashSet<String>,
}

/// Build configuration enclosing a file. Nested bundles point at their parent.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub config: Option<BundleConfig>,
    pub parent: Option<Arc<Bundle>>,
}

impl Bundle {
    pub fn new(config: BundleConfig) -> Self {
        Bundle {
            config: Some(config),
            parent: None,
        }
    }

    pub fn nested(parent: Arc<Bundle>) -> Self {
        Bundle {
            config: None,
            parent: Some(parent),
        }
    }

    /// Bundle at the top of the parent chain.
    pub fn root(&self) -> &Bundle {
        let mut bundle = self;
        while let Some(parent) = &bundle.parent {
            bundle = parent;
        }
        bundle
    }

    pub fn exports(&self, package: &str) -> bool {
        self.config
            .as_ref()
            .is_some_and(|c| c.exports.contains(package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporting(names: &[&str]) -> BundleConfig {
        BundleConfig {
            exports: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_root_follows_whole_chain() {
        let root = Arc::new(Bundle::new(exporting(&["quickly-polyfills"])));
        let middle = Arc::new(Bundle::nested(root));
        let leaf = Bundle::nested(middle);

        assert!(leaf.root().exports("quickly-polyfills"));
        assert!(!leaf.exports("quickly-polyfills"));
    }

    #[test]
    fn test_root_of_unconfigured_bundle() {
        let bundle = Bundle::default();
        assert!(!bundle.root().exports("anything"));
    }
}
