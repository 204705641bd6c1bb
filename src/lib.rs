//! # Module Rewrite Engine
//!
//! Turns one CommonJS-style JavaScript file into a self-contained
//! `.pragma library` script for a runtime that has no module loader.
//!
//! ## Output layout
//!
//! ```text
//! header        .pragma library + one `.import` line per require
//! postHeader    per-file preamble + imported-global wiring
//! body          the rewritten source
//! footer        own-global and export aliases
//! ```
//!
//! ## Rewrites
//!
//! 1. `var x = require('p')` → `var x = <require statement>;`
//! 2. `require('p');` on its own line → removed, dependency still registered
//! 3. `require('p')` inside an expression → `<require statement>`
//! 4. Babel re-export getters → `var n = exports.n = q.n;`
//!
//! ## Globals
//!
//! Files share symbols through `global`. Own globals (`global.NAME = ...`) get
//! a footer alias `var NAME = global.NAME;`. Globals a dependency exposes are
//! republished in postHeader as `var NAME = global.NAME = Q.global.NAME;` so a
//! third file can import them through this one.
//!
//! Idiom matching is textual (see [`idiom`]). Unrecognized shapes are left as
//! they are.

mod batch;
mod bundle;
mod cache;
mod dependency;
mod downlevel;
mod error;
mod exports;
mod file_type;
mod globals;
pub mod idiom;
mod js_file;
mod options;
mod regions;
mod requires;

#[cfg(feature = "napi")]
mod napi_bridge;

#[cfg(test)]
mod cache_tests;

pub use batch::transform_all;
pub use bundle::{Bundle, BundleConfig};
pub use cache::{CacheEntry, IncrementalCache, JsFileCache};
pub use dependency::{
    qualifier_for, Dependency, DependencyGlobals, DependencyResolver, ModuleDependency,
    StaticResolver,
};
pub use downlevel::{OxcDownleveler, SyntaxDownleveler};
pub use error::{ResolveError, Result, TransformError};
pub use file_type::{FileKind, FileType, FileTypeRegistry, SourceFile};
pub use js_file::{JsFile, TransformContext, TransformOutput};
pub use options::{PipelineOptions, DEFAULT_HEADER, DEFAULT_POST_HEADER, POLYFILL_PACKAGE};
pub use regions::{assemble, Region, Regions};
pub use requires::{collapse_blank_lines, DependencyMap};

#[cfg(feature = "napi")]
pub use napi_bridge::transform_js_native;
