//! Syntax downleveling for runtimes behind the current ECMAScript edition.

use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use std::path::Path;

use crate::error::{Result, TransformError};

pub trait SyntaxDownleveler: Send + Sync {
    /// Rewrite `source` to the target syntax. Malformed input is an error.
    fn downlevel(&self, source: &str, file_path: &Path) -> Result<String>;
}

/// Downleveler built on the oxc parser, transformer and codegen.
#[derive(Debug, Clone)]
pub struct OxcDownleveler {
    target: String,
}

impl OxcDownleveler {
    pub fn new(target: impl Into<String>) -> Self {
        OxcDownleveler {
            target: target.into(),
        }
    }
}

impl Default for OxcDownleveler {
    fn default() -> Self {
        OxcDownleveler::new("es2015")
    }
}

impl SyntaxDownleveler for OxcDownleveler {
    fn downlevel(&self, source: &str, file_path: &Path) -> Result<String> {
        let file = file_path.to_string_lossy().to_string();

        let options = TransformOptions::from_target(&self.target)
            .map_err(|e| TransformError::downlevel(&file, format!("bad target: {}", e)))?;

        let allocator = Allocator::default();
        // CommonJS sources are scripts, not modules
        let source_type = SourceType::default().with_module(false);

        let ret = Parser::new(&allocator, source, source_type).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
            return Err(TransformError::downlevel(&file, messages.join("; ")));
        }
        let mut program = ret.program;

        let scoping = SemanticBuilder::new().build(&program).semantic.into_scoping();
        let ret = Transformer::new(&allocator, file_path, &options)
            .build_with_scoping(scoping, &mut program);
        if !ret.errors.is_empty() {
            let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
            return Err(TransformError::downlevel(&file, messages.join("; ")));
        }

        Ok(Codegen::new().build(&program).code)
    }
}
