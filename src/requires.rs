//! Require rewriting.
//!
//! Each recognized `require` resolves its path, announces the binding in the
//! header and registers the dependency under its qualifier. What happens to the
//! matched text depends on the idiom.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use crate::dependency::{Dependency, DependencyResolver};
use crate::error::Result;
use crate::idiom::{RequireIdiom, RequireMatch};
use crate::regions::Region;

pub type DependencyMap = IndexMap<String, Arc<dyn Dependency>>;

/// Per-file bookkeeping the require passes write into.
pub struct RequireRewriter<'a> {
    resolver: &'a dyn DependencyResolver,
    header: &'a mut Region,
    dependencies: &'a mut DependencyMap,
}

impl<'a> RequireRewriter<'a> {
    pub fn new(
        resolver: &'a dyn DependencyResolver,
        header: &'a mut Region,
        dependencies: &'a mut DependencyMap,
    ) -> Self {
        RequireRewriter {
            resolver,
            header,
            dependencies,
        }
    }

    /// Register a dependency without touching the source text.
    pub fn inject(&mut self, import_path: &str) -> Result<String> {
        let dependency = self.resolver.resolve(import_path)?;
        let qualifier = dependency.qualifier(None);

        self.header.push(dependency.import_statement(None));
        self.dependencies.insert(qualifier.clone(), dependency);

        debug!(import_path, %qualifier, "injected require");
        Ok(qualifier)
    }

    /// Run the three require passes over `text`, then collapse the blank-line
    /// runs left behind by deleted statements.
    pub fn rewrite(&mut self, text: &str) -> Result<String> {
        let mut text = text.to_string();

        for idiom in RequireIdiom::PRECEDENCE {
            text = idiom.rewrite(&text, |found| self.replace(found))?;
        }

        Ok(collapse_blank_lines(&text))
    }

    fn replace(&mut self, found: &RequireMatch<'_>) -> Result<String> {
        let dependency = self.resolver.resolve(found.path)?;

        let qualifier = dependency.qualifier(found.alias);
        let require_statement = dependency.require_statement(found.alias);

        // Repeated requires of one path each add a header line; only the map
        // entry is replaced.
        self.header.push(dependency.import_statement(found.alias));
        self.dependencies.insert(qualifier.clone(), dependency);

        debug!(path = found.path, idiom = ?found.idiom, %qualifier, "rewrote require");

        Ok(match (found.idiom, found.alias) {
            (RequireIdiom::SideEffect, _) => String::new(),
            (_, Some(alias)) => format!("var {} = {};", alias, require_statement),
            (_, None) => require_statement,
        })
    }
}

/// Collapse every run of three or more newlines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("\n\n\n") {
        text = text.replace("\n\n\n", "\n\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n \n\nb"), "a\n \n\nb");
    }
}
