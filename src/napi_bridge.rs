//! Node binding for build tooling that drives the engine from JavaScript.

use napi_derive::napi;

use crate::dependency::StaticResolver;
use crate::error::TransformError;
use crate::js_file::{JsFile, TransformContext};
use crate::options::PipelineOptions;

fn to_napi(e: TransformError) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Transform one source file.
///
/// `resolution_json` maps each import path to a dependency descriptor
/// (`{ "path", "qualifier"?, "globals"? }`). Returns the serialized
/// [`TransformOutput`](crate::js_file::TransformOutput).
#[napi]
pub fn transform_js_native(
    source: String,
    file_path: String,
    resolution_json: String,
    options_json: String,
) -> napi::Result<String> {
    let options = PipelineOptions::from_json(&options_json).map_err(to_napi)?;
    let resolver = StaticResolver::from_json(&resolution_json)
        .map_err(|e| napi::Error::from_reason(format!("Invalid resolution table: {}", e)))?;

    let mut file = JsFile::new(file_path, source, options);
    file.transform(&TransformContext::new(&resolver))
        .map_err(to_napi)?;

    serde_json::to_string(&file.output())
        .map_err(|e| napi::Error::from_reason(format!("Failed to serialize output: {}", e)))
}
