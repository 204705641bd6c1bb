//! Transform pipeline for one JavaScript source unit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::bundle::Bundle;
use crate::cache::JsFileCache;
use crate::dependency::{Dependency, DependencyResolver};
use crate::downlevel::{OxcDownleveler, SyntaxDownleveler};
use crate::error::Result;
use crate::exports::{expose_exports, rewrite_exports};
use crate::globals;
use crate::idiom::has_require_call;
use crate::options::{PipelineOptions, FILENAME_PLACEHOLDER};
use crate::regions::Regions;
use crate::requires::{DependencyMap, RequireRewriter};

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Collaborators a transform borrows. Shared by every file of a run.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    pub resolver: &'a dyn DependencyResolver,
    /// Used when downleveling is enabled; an oxc downleveler for the
    /// configured target is built otherwise.
    pub downleveler: Option<&'a dyn SyntaxDownleveler>,
}

impl<'a> TransformContext<'a> {
    pub fn new(resolver: &'a dyn DependencyResolver) -> Self {
        TransformContext {
            resolver,
            downleveler: None,
        }
    }

    pub fn with_downleveler(mut self, downleveler: &'a dyn SyntaxDownleveler) -> Self {
        self.downleveler = Some(downleveler);
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    pub globals: Vec<String>,
    pub exported_globals: Vec<String>,
    /// Qualifiers in first-registration order
    pub dependencies: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// JS FILE
// ═══════════════════════════════════════════════════════════════════════════════

pub struct JsFile {
    path: PathBuf,
    text: String,
    regions: Regions,
    globals: Vec<String>,
    dependencies: DependencyMap,
    bundle: Option<Arc<Bundle>>,
    options: PipelineOptions,
}

impl JsFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>, options: PipelineOptions) -> Self {
        let regions = Regions::from_templates(&options.header_template, &options.post_header_template);
        JsFile {
            path: path.into(),
            text: text.into(),
            regions,
            globals: Vec::new(),
            dependencies: DependencyMap::new(),
            bundle: None,
            options,
        }
    }

    pub fn with_bundle(mut self, bundle: Arc<Bundle>) -> Self {
        self.bundle = Some(bundle);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Source text; the assembled module once [`transform`](Self::transform) ran.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn globals(&self) -> &[String] {
        &self.globals
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn dependency(&self, qualifier: &str) -> Option<&Arc<dyn Dependency>> {
        self.dependencies.get(qualifier)
    }

    pub fn imported_globals(&self) -> IndexMap<String, String> {
        globals::imported_globals(&self.dependencies)
    }

    pub fn exported_globals(&self) -> Vec<String> {
        globals::exported_globals(&self.dependencies, &self.globals)
    }

    /// Restore globals from a previous run without rescanning the text.
    pub fn load_from_cache(&mut self, cache: JsFileCache) {
        self.globals = cache.globals;
    }

    pub fn cache(&self) -> JsFileCache {
        JsFileCache {
            globals: self.globals.clone(),
        }
    }

    pub fn find_globals(&mut self) {
        self.globals = globals::find_globals(&self.text);
    }

    pub fn output(&self) -> TransformOutput {
        TransformOutput {
            code: self.text.clone(),
            globals: self.globals.clone(),
            exported_globals: self.exported_globals(),
            dependencies: self.dependencies.keys().cloned().collect(),
        }
    }

    fn needs_polyfills(&self) -> bool {
        if !self.options.polyfills {
            return false;
        }
        match &self.bundle {
            Some(bundle) => !bundle.root().exports(&self.options.polyfill_package),
            None => true,
        }
    }

    /// Run the whole pipeline once. Running it again on the same file injects
    /// every generated region a second time.
    #[instrument(skip_all, fields(file = %self.path.display()))]
    pub fn transform(&mut self, ctx: &TransformContext<'_>) -> Result<()> {
        if self.options.downlevel {
            self.text = match ctx.downleveler {
                Some(downleveler) => downleveler.downlevel(&self.text, &self.path)?,
                None => OxcDownleveler::new(self.options.downlevel_target.as_str())
                    .downlevel(&self.text, &self.path)?,
            };
        }

        let basename = self.basename();
        self.regions
            .post_header
            .substitute_once(FILENAME_PLACEHOLDER, &basename);

        let needs_polyfills = self.needs_polyfills();
        {
            let mut rewriter = RequireRewriter::new(
                ctx.resolver,
                &mut self.regions.header,
                &mut self.dependencies,
            );
            if needs_polyfills {
                rewriter.inject(&self.options.polyfill_package)?;
            }
            self.text = rewriter.rewrite(&self.text)?;
        }

        if has_require_call(&self.text) {
            debug!("require call with unrecognized shape left in place");
        }

        self.text = rewrite_exports(&self.text);

        self.find_globals();
        // Export wiring before import wiring: a file forwards its own globals
        // before republishing those of its dependencies.
        globals::export_globals(&self.globals, &mut self.regions.footer);
        globals::import_globals(&self.dependencies, &mut self.regions.post_header);
        expose_exports(&self.text, &mut self.regions.footer);

        self.text = self.regions.assemble(&self.text);

        info!(
            globals = self.globals.len(),
            dependencies = self.dependencies.len(),
            "transformed"
        );
        Ok(())
    }
}
