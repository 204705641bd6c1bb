//! Textual idiom matchers.
//!
//! The rewriters recognize a fixed set of source idioms rather than parsing
//! JavaScript. Every pattern lives here, behind typed matches, so the pipeline
//! never touches a capture group directly. Text that matches nothing is left
//! untouched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `var|let|const ALIAS = require('PATH');` ending the statement. Chained
    /// calls, member reads and further declarators fall through to the inline pass.
    static ref REQUIRE_AS_RE: Regex = Regex::new(
        r#"(?mR)\b(?:var|let|const)\s+([A-Za-z_$][\w$]*)\s*=\s*require\(\s*['"]([^'"\n]+)['"]\s*\)[ \t]*(?:;|$)"#
    )
    .unwrap();

    /// A line holding nothing but `require('PATH');`. The `;` is required: an
    /// unterminated line may be an argument or operand.
    static ref REQUIRE_SIDE_EFFECT_RE: Regex = Regex::new(
        r#"(?m)^[ \t]*require\(\s*['"]([^'"\n]+)['"]\s*\)[ \t]*;[ \t]*\r?$"#
    )
    .unwrap();

    /// `require('PATH')` anywhere an expression can stand. Group 1 keeps the
    /// preceding character so member calls like `loader.require(...)` are skipped.
    static ref REQUIRE_INLINE_RE: Regex = Regex::new(
        r#"(^|[^\w$.])require\(\s*['"]([^'"\n]+)['"]\s*\)"#
    )
    .unwrap();

    static ref REQUIRE_CALL_RE: Regex = Regex::new(r"(^|[^\w$.])require\s*\(").unwrap();

    static ref EXPORT_NAMED_RE: Regex = Regex::new(concat!(
        r#"Object\.defineProperty\(\s*exports\s*,\s*['"]([\w$]+)['"]\s*,\s*\{\s*"#,
        r#"enumerable\s*:\s*true\s*,\s*get\s*:\s*function(?:\s+[\w$]+)?\s*\(\s*\)\s*\{\s*"#,
        r#"return\s+([\w$]+)\.([\w$]+)\s*;?\s*\}\s*,?\s*\}\s*\)[ \t]*;?"#
    ))
    .unwrap();

    static ref EXPORT_DEFAULT_RE: Regex = Regex::new(concat!(
        r#"Object\.defineProperty\(\s*exports\s*,\s*['"]([\w$]+)['"]\s*,\s*\{\s*"#,
        r#"enumerable\s*:\s*true\s*,\s*get\s*:\s*function(?:\s+[\w$]+)?\s*\(\s*\)\s*\{\s*"#,
        r#"return\s+(?:_interopRequireDefault\(\s*([\w$]+)\s*\)|([\w$]+))\.default\s*;?\s*\}\s*,?\s*\}\s*\)[ \t]*;?"#
    ))
    .unwrap();

    static ref GLOBAL_ASSIGN_RE: Regex = Regex::new(r"\bglobal\.([\w$]+)\s*(=+)").unwrap();
    static ref EXPORT_ASSIGN_RE: Regex = Regex::new(r"\bexports\.([\w$]+)\s*(=+)").unwrap();
}

/// `Regex::replace_all` with a replacement callback that may fail. The first
/// error stops the scan and is returned as is.
pub fn try_replace_all<E>(
    re: &Regex,
    text: &str,
    mut replace: impl FnMut(&Captures) -> Result<String, E>,
) -> Result<String, E> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

// ═══════════════════════════════════════════════════════════════════════════════
// REQUIRE IDIOMS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequireIdiom {
    Aliased,
    SideEffect,
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireMatch<'t> {
    pub idiom: RequireIdiom,
    pub path: &'t str,
    pub alias: Option<&'t str>,
}

impl RequireIdiom {
    /// Order the passes run in. Earlier idioms consume text later ones would
    /// otherwise see.
    pub const PRECEDENCE: [RequireIdiom; 3] = [
        RequireIdiom::Aliased,
        RequireIdiom::SideEffect,
        RequireIdiom::Inline,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            RequireIdiom::Aliased => &REQUIRE_AS_RE,
            RequireIdiom::SideEffect => &REQUIRE_SIDE_EFFECT_RE,
            RequireIdiom::Inline => &REQUIRE_INLINE_RE,
        }
    }

    fn read<'t>(self, caps: &Captures<'t>) -> Option<RequireMatch<'t>> {
        let (path, alias) = match self {
            RequireIdiom::Aliased => (caps.get(2)?, caps.get(1).map(|m| m.as_str())),
            RequireIdiom::SideEffect => (caps.get(1)?, None),
            RequireIdiom::Inline => (caps.get(2)?, None),
        };
        Some(RequireMatch {
            idiom: self,
            path: path.as_str(),
            alias,
        })
    }

    /// All occurrences of this idiom, in source order.
    pub fn find_all(self, text: &str) -> Vec<RequireMatch<'_>> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| self.read(&caps))
            .collect()
    }

    /// Replace every occurrence with the callback's expansion.
    pub fn rewrite<E>(
        self,
        text: &str,
        mut expand: impl FnMut(&RequireMatch<'_>) -> Result<String, E>,
    ) -> Result<String, E> {
        try_replace_all(self.regex(), text, |caps| {
            let Some(found) = self.read(caps) else {
                return Ok(caps[0].to_string());
            };
            let expansion = expand(&found)?;
            match self {
                // The leading character belongs to the surrounding code
                RequireIdiom::Inline => {
                    let prefix = caps.get(1).map_or("", |m| m.as_str());
                    Ok(format!("{}{}", prefix, expansion))
                }
                _ => Ok(expansion),
            }
        })
    }
}

/// True when a `require(` call is still present, e.g. one with a computed path.
pub fn has_require_call(text: &str) -> bool {
    REQUIRE_CALL_RE.is_match(text)
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPORT IDIOMS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportIdiom {
    /// `export { name } from '...'` as emitted by Babel
    Named,
    /// `export { default as name } from '...'`
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMatch<'t> {
    pub idiom: ExportIdiom,
    pub name: &'t str,
    pub qualifier: &'t str,
    /// Property read off the qualifier, `default` for default re-exports
    pub property: &'t str,
}

impl ExportIdiom {
    fn regex(self) -> &'static Regex {
        match self {
            ExportIdiom::Named => &EXPORT_NAMED_RE,
            ExportIdiom::Default => &EXPORT_DEFAULT_RE,
        }
    }

    fn read<'t>(self, caps: &Captures<'t>) -> Option<ExportMatch<'t>> {
        let name = caps.get(1)?.as_str();
        match self {
            ExportIdiom::Named => {
                let property = caps.get(3)?.as_str();
                // Plain `.default` getters belong to the default idiom
                if property == "default" {
                    return None;
                }
                Some(ExportMatch {
                    idiom: self,
                    name,
                    qualifier: caps.get(2)?.as_str(),
                    property,
                })
            }
            ExportIdiom::Default => Some(ExportMatch {
                idiom: self,
                name,
                qualifier: caps.get(2).or_else(|| caps.get(3))?.as_str(),
                property: "default",
            }),
        }
    }

    pub fn find_all(self, text: &str) -> Vec<ExportMatch<'_>> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| self.read(&caps))
            .collect()
    }

    pub fn rewrite(self, text: &str, mut expand: impl FnMut(&ExportMatch<'_>) -> String) -> String {
        let result: Result<String, std::convert::Infallible> =
            try_replace_all(self.regex(), text, |caps| {
                Ok(match self.read(caps) {
                    Some(found) => expand(&found),
                    None => caps[0].to_string(),
                })
            });
        match result {
            Ok(text) => text,
            Err(never) => match never {},
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ASSIGNMENT SCANS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentTarget {
    /// `global.NAME = ...`
    Global,
    /// `exports.NAME = ...`
    Exports,
}

impl AssignmentTarget {
    fn regex(self) -> &'static Regex {
        match self {
            AssignmentTarget::Global => &GLOBAL_ASSIGN_RE,
            AssignmentTarget::Exports => &EXPORT_ASSIGN_RE,
        }
    }

    /// Distinct assigned names in first-occurrence order. `==` and `===`
    /// comparisons are not assignments.
    pub fn assigned_names(self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in self.regex().captures_iter(text) {
            if caps.get(2).map(|m| m.as_str()) != Some("=") {
                continue;
            }
            if let Some(name) = caps.get(1) {
                if !names.iter().any(|n| n == name.as_str()) {
                    names.push(name.as_str().to_string());
                }
            }
        }
        names
    }
}
