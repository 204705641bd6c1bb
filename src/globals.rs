//! Global symbol registry.
//!
//! The target runtime has no module loader, so files share symbols through a
//! `global` table. A file's own globals are the names it assigns onto
//! `global`; its imported globals are the names its dependencies expose, which
//! it republishes on its own `global` so a third file can import them through it.

use indexmap::IndexMap;

use crate::dependency::DependencyGlobals;
use crate::idiom::AssignmentTarget;
use crate::regions::Region;
use crate::requires::DependencyMap;

/// Distinct `global.NAME =` assignments in first-occurrence order.
pub fn find_globals(text: &str) -> Vec<String> {
    AssignmentTarget::Global.assigned_names(text)
}

pub fn export_line(name: &str) -> String {
    format!("var {name} = global.{name};")
}

pub fn import_line(name: &str, source: &str) -> String {
    format!("var {name} = global.{name} = {source}.global.{name};")
}

/// Footer aliases for every own global.
pub fn export_globals(globals: &[String], footer: &mut Region) {
    for name in globals {
        footer.push(export_line(name));
    }
}

/// Name → expression of the object whose `global` table carries the name.
/// A name exposed by several dependencies keeps its first position and takes
/// the last dependency's expression.
pub fn imported_globals(dependencies: &DependencyMap) -> IndexMap<String, String> {
    let mut globals = IndexMap::new();

    for (qualifier, dependency) in dependencies {
        match dependency.globals() {
            DependencyGlobals::Names(names) => {
                for name in names {
                    globals.insert(name.clone(), qualifier.clone());
                }
            }
            DependencyGlobals::Mapped(map) => {
                for (name, property) in map {
                    globals.insert(name.clone(), format!("{}.{}", qualifier, property));
                }
            }
        }
    }

    globals
}

/// postHeader wiring for every imported global, after one blank separator line.
pub fn import_globals(dependencies: &DependencyMap, post_header: &mut Region) {
    post_header.push("");
    for (name, source) in imported_globals(dependencies) {
        post_header.push(import_line(&name, &source));
    }
}

/// Imported names followed by own globals. Not deduplicated: a name that is
/// both imported and assigned locally is listed twice.
pub fn exported_globals(dependencies: &DependencyMap, own: &[String]) -> Vec<String> {
    imported_globals(dependencies)
        .into_keys()
        .chain(own.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{Dependency, ModuleDependency};
    use std::sync::Arc;

    fn deps(entries: Vec<(&str, DependencyGlobals)>) -> DependencyMap {
        let mut map = DependencyMap::new();
        for (qualifier, globals) in entries {
            let dep = ModuleDependency::new(format!("{}.js", qualifier)).with_globals(globals);
            map.insert(qualifier.to_string(), Arc::new(dep) as Arc<dyn Dependency>);
        }
        map
    }

    #[test]
    fn test_find_globals_is_idempotent() {
        let text = "global.b = 1;\nglobal.a = function () { global.b = 2; };\nglobal.c = 3;";
        let first = find_globals(text);
        let second = find_globals(text);
        assert_eq!(first, vec!["b", "a", "c"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_imported_globals_both_shapes() {
        let mut mapped = IndexMap::new();
        mapped.insert("Item".to_string(), "types".to_string());

        let map = deps(vec![
            ("Dep_a", DependencyGlobals::Names(vec!["foo".into(), "bar".into()])),
            ("Dep_b", DependencyGlobals::Mapped(mapped)),
        ]);

        let imported = imported_globals(&map);
        let entries: Vec<_> = imported.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            entries,
            vec![("foo", "Dep_a"), ("bar", "Dep_a"), ("Item", "Dep_b.types")]
        );
    }

    #[test]
    fn test_later_dependency_wins_first_position_kept() {
        let map = deps(vec![
            ("Dep_a", DependencyGlobals::Names(vec!["foo".into(), "bar".into()])),
            ("Dep_b", DependencyGlobals::Names(vec!["foo".into()])),
        ]);

        let imported = imported_globals(&map);
        let keys: Vec<_> = imported.keys().cloned().collect();
        assert_eq!(keys, vec!["foo", "bar"]);
        assert_eq!(imported["foo"], "Dep_b");
    }

    #[test]
    fn test_import_wiring_lines() {
        let map = deps(vec![("Dep_a", DependencyGlobals::Names(vec!["foo".into()]))]);
        let mut post_header = Region::seeded("var global = {};");
        import_globals(&map, &mut post_header);
        assert_eq!(
            post_header.render(),
            "var global = {};\n\nvar foo = global.foo = Dep_a.global.foo;"
        );
    }

    #[test]
    fn test_exported_globals_keeps_duplicates() {
        let map = deps(vec![("Dep_a", DependencyGlobals::Names(vec!["foo".into()]))]);
        let own = vec!["foo".to_string(), "baz".to_string()];
        assert_eq!(exported_globals(&map, &own), vec!["foo", "foo", "baz"]);
    }

    #[test]
    fn test_export_wiring_lines() {
        let mut footer = Region::new();
        export_globals(&["foo".to_string()], &mut footer);
        assert_eq!(footer.render(), "var foo = global.foo;");
    }
}
