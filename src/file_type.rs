//! File type dispatch.
//!
//! Every file type exposes the same capabilities through [`SourceFile`]. The
//! registry maps a path pattern to the variant that handles it.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::bundle::Bundle;
use crate::cache::JsFileCache;
use crate::error::Result;
use crate::js_file::{JsFile, TransformContext};
use crate::options::PipelineOptions;

lazy_static! {
    static ref JS_FILE_RE: Regex = Regex::new(r"\.js$").unwrap();
}

pub trait SourceFile {
    fn path(&self) -> &Path;

    fn text(&self) -> &str;

    /// Seed state from a cache record produced by [`SourceFile::cache`].
    fn load_from_cache(&mut self, cache: &Value) -> Result<()>;

    fn cache(&self) -> Result<Value>;

    fn transform(&mut self, ctx: &TransformContext<'_>) -> Result<()>;
}

impl SourceFile for JsFile {
    fn path(&self) -> &Path {
        JsFile::path(self)
    }

    fn text(&self) -> &str {
        JsFile::text(self)
    }

    fn load_from_cache(&mut self, cache: &Value) -> Result<()> {
        let record: JsFileCache = serde_json::from_value(cache.clone())?;
        JsFile::load_from_cache(self, record);
        Ok(())
    }

    fn cache(&self) -> Result<Value> {
        Ok(serde_json::to_value(JsFile::cache(self))?)
    }

    fn transform(&mut self, ctx: &TransformContext<'_>) -> Result<()> {
        JsFile::transform(self, ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Js,
}

pub enum FileKind {
    Js(JsFile),
}

impl FileKind {
    pub fn file_type(&self) -> FileType {
        match self {
            FileKind::Js(_) => FileType::Js,
        }
    }

    pub fn as_js(&self) -> Option<&JsFile> {
        match self {
            FileKind::Js(file) => Some(file),
        }
    }

    fn inner(&self) -> &dyn SourceFile {
        match self {
            FileKind::Js(file) => file,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SourceFile {
        match self {
            FileKind::Js(file) => file,
        }
    }
}

impl SourceFile for FileKind {
    fn path(&self) -> &Path {
        self.inner().path()
    }

    fn text(&self) -> &str {
        self.inner().text()
    }

    fn load_from_cache(&mut self, cache: &Value) -> Result<()> {
        self.inner_mut().load_from_cache(cache)
    }

    fn cache(&self) -> Result<Value> {
        self.inner().cache()
    }

    fn transform(&mut self, ctx: &TransformContext<'_>) -> Result<()> {
        self.inner_mut().transform(ctx)
    }
}

pub struct FileTypeRegistry {
    entries: Vec<(Regex, FileType)>,
}

impl Default for FileTypeRegistry {
    fn default() -> Self {
        let mut registry = FileTypeRegistry::empty();
        registry.entries.push((JS_FILE_RE.clone(), FileType::Js));
        registry
    }
}

impl FileTypeRegistry {
    pub fn empty() -> Self {
        FileTypeRegistry {
            entries: Vec::new(),
        }
    }

    /// Later registrations take precedence over earlier ones.
    pub fn register(&mut self, pattern: &str, file_type: FileType) -> Result<()> {
        let re = Regex::new(pattern)?;
        self.entries.push((re, file_type));
        Ok(())
    }

    pub fn detect(&self, path: &Path) -> Option<FileType> {
        let path = path.to_string_lossy();
        self.entries
            .iter()
            .rev()
            .find(|(re, _)| re.is_match(&path))
            .map(|(_, file_type)| *file_type)
    }

    pub fn open(
        &self,
        path: impl AsRef<Path>,
        text: impl Into<String>,
        bundle: Option<Arc<Bundle>>,
        options: PipelineOptions,
    ) -> Option<FileKind> {
        let path = path.as_ref();
        match self.detect(path)? {
            FileType::Js => {
                let mut file = JsFile::new(path, text, options);
                if let Some(bundle) = bundle {
                    file = file.with_bundle(bundle);
                }
                Some(FileKind::Js(file))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        let registry = FileTypeRegistry::default();
        assert_eq!(registry.detect(Path::new("src/main.js")), Some(FileType::Js));
        assert_eq!(registry.detect(Path::new("src/Main.qml")), None);
        assert_eq!(registry.detect(Path::new("src/main.json")), None);
    }

    #[test]
    fn test_register_extra_pattern() {
        let mut registry = FileTypeRegistry::empty();
        assert!(registry.detect(Path::new("a.js")).is_none());
        registry.register(r"\.(js|cjs)$", FileType::Js).unwrap();
        assert_eq!(registry.detect(Path::new("a.cjs")), Some(FileType::Js));
        assert!(registry.register(r"(", FileType::Js).is_err());
    }

    #[test]
    fn test_open_and_cache_through_trait() {
        let registry = FileTypeRegistry::default();
        let mut file = registry
            .open("lib/a.js", "global.x = 1;", None, PipelineOptions::default())
            .unwrap();
        assert_eq!(file.file_type(), FileType::Js);

        let record = serde_json::json!({ "globals": ["x", "y"] });
        file.load_from_cache(&record).unwrap();
        assert_eq!(file.cache().unwrap(), record);
        assert_eq!(file.as_js().unwrap().globals(), ["x", "y"]);
    }

    #[test]
    fn test_open_unknown_type() {
        let registry = FileTypeRegistry::default();
        assert!(registry
            .open("style.css", "", None, PipelineOptions::default())
            .is_none());
    }
}
