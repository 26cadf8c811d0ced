//! Error types for NodeScript
//!
//! Uses `thiserror` for library errors. The validation variants render the
//! exact messages the CLI prints, so their `Display` impls are load-bearing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for NodeScript operations
pub type NodeScriptResult<T> = Result<T, NodeScriptError>;

/// Main error type for NodeScript operations
#[derive(Error, Debug)]
pub enum NodeScriptError {
    /// Bare invocation: the REPL is not built
    #[error("REPL not implemented yet")]
    ReplUnimplemented,

    /// A single script argument: direct execution is not built
    #[error("cannot execute '{input}'. Functionality not implemented yet")]
    ExecUnimplemented { input: PathBuf },

    /// `--eval` is not built
    #[error("--eval not implemented yet")]
    EvalUnimplemented,

    /// `--print` is not built
    #[error("--print not implemented yet")]
    PrintUnimplemented,

    /// `--watch` given without `--output`
    #[error("--watch requires --output")]
    WatchRequiresOutput,

    /// `--output` needs exactly an input path and an output path
    #[error("--output requires 2 path names (input and output)")]
    OutputArity,

    /// Input path missing on disk
    #[error("'{input}' doesn't exist")]
    InputMissing { input: PathBuf },

    /// Input is a file but the existing output is a directory
    #[error("'{output}' is not a file")]
    OutputNotAFile { output: PathBuf },

    /// Input is a directory but the existing output is a file
    #[error("'{output}' is not a directory")]
    OutputNotADirectory { output: PathBuf },

    /// Parser rejected a source file
    #[error("syntax error in {file}:{line}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Transformer rejected a parsed source file
    #[error("transform error in {file}:{line}: {message}")]
    Transform {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
