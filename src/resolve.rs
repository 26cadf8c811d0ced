//! Path and option validation
//!
//! Turns the parsed command-line option set into a validated
//! [`CompileRequest`](crate::compile::CompileRequest), or fails with the
//! error the CLI prints verbatim. The rules are checked in a fixed precedence
//! and the first match wins.

use std::path::PathBuf;

use crate::compile::CompileRequest;
use crate::error::{NodeScriptError, NodeScriptResult};

/// The option set produced by the argument parser.
///
/// Kept free of any clap types so the resolver (and the library) can be
/// exercised without going through the binary's CLI surface.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub eval: bool,
    pub print: bool,
    pub output: bool,
    pub watch: bool,
    /// Positional path arguments, in order
    pub paths: Vec<PathBuf>,
}

impl CliOptions {
    fn no_flags(&self) -> bool {
        !self.eval && !self.print && !self.output && !self.watch
    }
}

/// Validate the option set against the filesystem.
///
/// Performs stat-level checks only; nothing is created or modified here.
/// Extra positional arguments beyond the first two are ignored.
pub fn resolve(options: &CliOptions) -> NodeScriptResult<CompileRequest> {
    let input = options.paths.first();

    if options.no_flags() && options.paths.is_empty() {
        return Err(NodeScriptError::ReplUnimplemented);
    }
    if options.no_flags() && options.paths.len() == 1 {
        return Err(NodeScriptError::ExecUnimplemented {
            input: options.paths[0].clone(),
        });
    }
    if options.eval {
        return Err(NodeScriptError::EvalUnimplemented);
    }
    if options.print {
        return Err(NodeScriptError::PrintUnimplemented);
    }
    if options.watch && !options.output {
        return Err(NodeScriptError::WatchRequiresOutput);
    }
    if options.output {
        if options.paths.len() != 2 {
            return Err(NodeScriptError::OutputArity);
        }
        let input = &options.paths[0];
        let output = &options.paths[1];

        if !input.exists() {
            return Err(NodeScriptError::InputMissing {
                input: input.clone(),
            });
        }
        if input.is_file() && output.is_dir() {
            return Err(NodeScriptError::OutputNotAFile {
                output: output.clone(),
            });
        }
        if input.is_dir() && output.is_file() {
            return Err(NodeScriptError::OutputNotADirectory {
                output: output.clone(),
            });
        }
    }

    // Either --output validation passed, or two bare positionals were given;
    // the latter compiles without validation, as the CLI has always done.
    match (input, options.paths.get(1)) {
        (Some(input), Some(output)) => Ok(CompileRequest {
            input: input.clone(),
            output: output.clone(),
        }),
        // Unreachable given the precedence rules above; refuse rather than panic.
        _ => Err(NodeScriptError::OutputArity),
    }
}
