use rayon::prelude::*;
use tracing::warn;

use crate::error::Result;
use crate::file_type::{FileKind, SourceFile};
use crate::js_file::TransformContext;

/// Transform every file in parallel. Results line up with `files`; a failed
/// file does not stop the others.
pub fn transform_all(files: &mut [FileKind], ctx: &TransformContext<'_>) -> Vec<Result<()>> {
    files
        .par_iter_mut()
        .map(|file| {
            let result = file.transform(ctx);
            if let Err(e) = &result {
                warn!(file = %file.path().display(), error = %e, "transform failed");
            }
            result
        })
        .collect()
}
