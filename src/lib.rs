//! NodeScript - compiler and watch-mode build driver for the `.ns` dialect
//!
//! NodeScript compiles a source file or a whole source tree into a parallel
//! tree of JavaScript files, and can keep the output live-updated while the
//! sources are being edited.

pub mod compile;
pub mod dialect;
pub mod error;
pub mod resolve;
pub mod traverse;
pub mod watcher;

// Re-exports for convenience
pub use compile::{map_output, CompileEvent, CompileRequest, Compiler, FailurePolicy};
pub use dialect::{DialectError, Frontend, NsFrontend, ParseOptions, SyntaxTree, TransformOptions};
pub use error::{NodeScriptError, NodeScriptResult};
pub use resolve::{resolve, CliOptions};
pub use traverse::{source_files, SourceWalk};
pub use watcher::{watch, DebounceState, WatchKind, WatchOptions};

/// Extension identifying NodeScript sources
pub const SOURCE_EXT: &str = "ns";

/// Extension applied to compiled output files
pub const TARGET_EXT: &str = "js";
