//! Dependency contract consumed by the rewriters.
//!
//! Resolution itself belongs to the caller. [`ModuleDependency`] and
//! [`StaticResolver`] are a data-driven implementation of the contract, used by
//! the Node binding and by tests.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use crate::error::ResolveError;

// ═══════════════════════════════════════════════════════════════════════════════
// CONTRACT
// ═══════════════════════════════════════════════════════════════════════════════

/// Globals a dependency exposes.
///
/// Both shapes exist in the wild and both have to keep working: a plain list
/// exposes each name as itself, a mapping exposes a local name through a
/// property of the dependency's export surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyGlobals {
    Names(Vec<String>),
    Mapped(IndexMap<String, String>),
}

impl Default for DependencyGlobals {
    fn default() -> Self {
        DependencyGlobals::Names(Vec::new())
    }
}

pub trait Dependency: Debug + Send + Sync {
    /// Namespace symbol for this import, overridden by an explicit alias.
    fn qualifier(&self, alias: Option<&str>) -> String;

    /// Header line announcing the binding.
    fn import_statement(&self, alias: Option<&str>) -> String;

    /// Expression used in place of the original `require(...)` call.
    fn require_statement(&self, alias: Option<&str>) -> String;

    fn globals(&self) -> &DependencyGlobals;
}

pub trait DependencyResolver: Send + Sync {
    fn resolve(&self, import_path: &str) -> Result<Arc<dyn Dependency>, ResolveError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODULE DEPENDENCY
// ═══════════════════════════════════════════════════════════════════════════════

pub const QUALIFIER_PREFIX: &str = "Dep_";

lazy_static! {
    static ref NON_IDENT_RE: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// `Dep_` + the name with every non-identifier character replaced by `_`.
/// The prefix keeps qualifiers capitalized, which QML import qualifiers require.
pub fn qualifier_for(name: &str) -> String {
    format!("{}{}", QUALIFIER_PREFIX, NON_IDENT_RE.replace_all(name, "_"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDependency {
    /// Path written into the `.import` line
    pub path: String,
    #[serde(default)]
    pub qualifier: Option<String>,
    #[serde(default)]
    pub globals: DependencyGlobals,
}

impl ModuleDependency {
    pub fn new(path: impl Into<String>) -> Self {
        ModuleDependency {
            path: path.into(),
            qualifier: None,
            globals: DependencyGlobals::default(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_globals(mut self, globals: DependencyGlobals) -> Self {
        self.globals = globals;
        self
    }

    fn default_qualifier(&self) -> String {
        if let Some(q) = &self.qualifier {
            return q.clone();
        }
        let stem = Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.path.as_str());
        qualifier_for(stem)
    }
}

impl Dependency for ModuleDependency {
    fn qualifier(&self, alias: Option<&str>) -> String {
        match alias {
            Some(alias) => qualifier_for(alias),
            None => self.default_qualifier(),
        }
    }

    fn import_statement(&self, alias: Option<&str>) -> String {
        format!(".import \"{}\" as {}", self.path, self.qualifier(alias))
    }

    fn require_statement(&self, alias: Option<&str>) -> String {
        format!("{}.exports", self.qualifier(alias))
    }

    fn globals(&self) -> &DependencyGlobals {
        &self.globals
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATIC RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Resolver backed by a fixed import-path table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticResolver {
    modules: HashMap<String, ModuleDependency>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, import_path: impl Into<String>, dependency: ModuleDependency) {
        self.modules.insert(import_path.into(), dependency);
    }

    pub fn with(mut self, import_path: impl Into<String>, dependency: ModuleDependency) -> Self {
        self.insert(import_path, dependency);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}

impl DependencyResolver for StaticResolver {
    fn resolve(&self, import_path: &str) -> Result<Arc<dyn Dependency>, ResolveError> {
        self.modules
            .get(import_path)
            .map(|dep| Arc::new(dep.clone()) as Arc<dyn Dependency>)
            .ok_or_else(|| ResolveError::new(import_path, "no such module"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_alias_override() {
        let dep = ModuleDependency::new("lib/util.js");
        assert_eq!(dep.qualifier(None), "Dep_util");
        assert_eq!(dep.qualifier(Some("_util")), "Dep__util");
        assert_eq!(dep.require_statement(Some("u")), "Dep_u.exports");
        assert_eq!(dep.import_statement(None), ".import \"lib/util.js\" as Dep_util");
    }

    #[test]
    fn test_qualifier_sanitizes_package_names() {
        let dep = ModuleDependency::new("quickly-polyfills");
        assert_eq!(dep.qualifier(None), "Dep_quickly_polyfills");
    }

    #[test]
    fn test_globals_deserialize_both_shapes() {
        let list: ModuleDependency =
            serde_json::from_str(r#"{ "path": "a.js", "globals": ["foo", "bar"] }"#).unwrap();
        assert_eq!(
            list.globals,
            DependencyGlobals::Names(vec!["foo".into(), "bar".into()])
        );

        let mapped: ModuleDependency =
            serde_json::from_str(r#"{ "path": "b.js", "globals": { "Item": "types" } }"#).unwrap();
        match mapped.globals {
            DependencyGlobals::Mapped(map) => assert_eq!(map.get("Item").unwrap(), "types"),
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_static_resolver_unknown_path() {
        let resolver = StaticResolver::new().with("./a", ModuleDependency::new("a.js"));
        assert!(resolver.resolve("./a").is_ok());
        let err = resolver.resolve("./missing").unwrap_err();
        assert_eq!(err.import_path, "./missing");
    }
}
