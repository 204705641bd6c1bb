use tracing::debug;

use crate::idiom::{AssignmentTarget, ExportIdiom, ExportMatch};
use crate::regions::Region;

/// Rewrite re-export idioms to declarations that are both a local binding and
/// an export.
pub fn rewrite_exports(text: &str) -> String {
    let text = ExportIdiom::Named.rewrite(text, reexport_line);
    ExportIdiom::Default.rewrite(&text, reexport_line)
}

fn reexport_line(found: &ExportMatch<'_>) -> String {
    debug!(name = found.name, qualifier = found.qualifier, idiom = ?found.idiom, "rewrote re-export");
    format!(
        "var {name} = exports.{name} = {}.{};",
        found.qualifier,
        found.property,
        name = found.name
    )
}

pub fn exposure_line(name: &str) -> String {
    format!("var {name} = exports.{name};")
}

/// Append a local alias to `footer` for every distinct `exports.NAME =` in `text`.
pub fn expose_exports(text: &str, footer: &mut Region) -> Vec<String> {
    let names = AssignmentTarget::Exports.assigned_names(text);
    for name in &names {
        footer.push(exposure_line(name));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_named_and_default() {
        let text = concat!(
            "Object.defineProperty(exports, 'foo', { enumerable: true, get: function get() { return _bar.foo; } });\n",
            "Object.defineProperty(exports, 'Baz', { enumerable: true, get: function get() { return _interopRequireDefault(_baz).default; } });\n",
        );
        let out = rewrite_exports(text);
        assert_eq!(
            out,
            "var foo = exports.foo = _bar.foo;\nvar Baz = exports.Baz = _baz.default;\n"
        );
    }

    #[test]
    fn test_renamed_reexport_reads_source_property() {
        let text = "Object.defineProperty(exports, 'bar', { enumerable: true, get: function get() { return _mod.foo; } });";
        assert_eq!(rewrite_exports(text), "var bar = exports.bar = _mod.foo;");
    }

    #[test]
    fn test_expose_exports_distinct_in_order() {
        let mut footer = Region::new();
        let text = "exports.b = 1;\nexports.a = 2;\nexports.b = 3;\nif (exports.c == 1) {}";
        let names = expose_exports(text, &mut footer);
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
        assert_eq!(footer.render(), "var b = exports.b;\nvar a = exports.a;");
    }

    #[test]
    fn test_unmatched_text_untouched() {
        let text = "Object.defineProperty(exports, '__esModule', { value: true });";
        assert_eq!(rewrite_exports(text), text);
    }
}
