use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

pub const DEFAULT_HEADER: &str = ".pragma library";

pub const DEFAULT_POST_HEADER: &str = r#"var global = {};
var exports = {};
var module = { exports: exports };
var __filename = "FILENAME";"#;

/// Package the runtime needs loaded once per bundle.
pub const POLYFILL_PACKAGE: &str = "quickly-polyfills";

pub const FILENAME_PLACEHOLDER: &str = "FILENAME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    /// Seed text of the header region
    pub header_template: String,
    /// Seed text of the postHeader region, `FILENAME` is substituted once
    pub post_header_template: String,
    pub polyfills: bool,
    pub polyfill_package: String,
    pub downlevel: bool,
    /// oxc target string, e.g. `es2015` or `es2017`
    pub downlevel_target: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            header_template: DEFAULT_HEADER.to_string(),
            post_header_template: DEFAULT_POST_HEADER.to_string(),
            polyfills: true,
            polyfill_package: POLYFILL_PACKAGE.to_string(),
            downlevel: false,
            downlevel_target: "es2015".to_string(),
        }
    }
}

impl PipelineOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| TransformError::Options(e.to_string()))
    }

    pub fn without_polyfills(mut self) -> Self {
        self.polyfills = false;
        self
    }
}
