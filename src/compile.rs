//! Compile engine
//!
//! Dispatches a validated input/output pair: a single file is parsed,
//! transformed, and written out with its permission bits preserved; a
//! directory is traversed and every discovered source file is compiled to its
//! mapped output path. Failure handling is injected as an explicit
//! [`FailurePolicy`] so one-shot and watch mode share the same engine.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::dialect::Frontend;
use crate::error::{NodeScriptError, NodeScriptResult};
use crate::traverse::source_files;
use crate::TARGET_EXT;

/// A validated (input, output) pair; both sides are the same kind of path
/// (file/file or directory/directory), enforced once by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// What to do when a compile invocation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Re-raise the failure, aborting the run (one-shot mode)
    Propagate,
    /// Hand the failure to the observer and keep going (watch mode)
    Report,
}

/// Progress notifications emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileEvent {
    Compiled { input: PathBuf, output: PathBuf },
    Failed { message: String },
}

/// Map a source file under `input_root` to its output path: the root prefix
/// is swapped for `output_root` and the extension rewritten.
///
/// Total over every path the traverser can produce.
pub fn map_output(input_root: &Path, source: &Path, output_root: &Path) -> PathBuf {
    let relative = source.strip_prefix(input_root).unwrap_or(source);
    output_root.join(relative).with_extension(TARGET_EXT)
}

/// The compile engine. Holds the dialect frontend and the failure policy;
/// both are threaded in explicitly rather than read from any global state.
pub struct Compiler<'a> {
    frontend: &'a dyn Frontend,
    policy: FailurePolicy,
}

impl<'a> Compiler<'a> {
    pub fn new(frontend: &'a dyn Frontend, policy: FailurePolicy) -> Self {
        Self { frontend, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Compile a file, or a whole directory tree.
    ///
    /// Every invocation is bracketed by the failure policy, including each
    /// per-file recursion under a directory: with [`FailurePolicy::Report`] a
    /// bad file is reported and its siblings still compile, while
    /// [`FailurePolicy::Propagate`] aborts the whole batch on first failure.
    pub fn compile(
        &self,
        input: &Path,
        output: &Path,
        observer: &mut dyn FnMut(CompileEvent),
    ) -> NodeScriptResult<()> {
        match self.dispatch(input, output, observer) {
            Err(error) if self.policy == FailurePolicy::Report => {
                observer(CompileEvent::Failed {
                    message: error.to_string(),
                });
                Ok(())
            }
            result => result,
        }
    }

    fn dispatch(
        &self,
        input: &Path,
        output: &Path,
        observer: &mut dyn FnMut(CompileEvent),
    ) -> NodeScriptResult<()> {
        if input.is_dir() {
            for entry in source_files(input) {
                let file = entry?;
                let mapped = map_output(input, &file, output);
                self.compile(&file, &mapped, observer)?;
            }
            Ok(())
        } else {
            self.compile_file(input, output, observer)
        }
    }

    /// parse -> transform -> write; the output only appears if all three
    /// steps succeed, and it inherits the source file's permission bits.
    fn compile_file(
        &self,
        input: &Path,
        output: &Path,
        observer: &mut dyn FnMut(CompileEvent),
    ) -> NodeScriptResult<()> {
        let source = fs::read_to_string(input)?;

        let tree = self
            .frontend
            .parse(&source)
            .map_err(|e| NodeScriptError::Syntax {
                file: input.to_path_buf(),
                line: e.line,
                message: e.message,
            })?;

        let compiled =
            self.frontend
                .transform(&tree, &source)
                .map_err(|e| NodeScriptError::Transform {
                    file: input.to_path_buf(),
                    line: e.line,
                    message: e.message,
                })?;

        write_output(output, &compiled)?;
        copy_permissions(input, output)?;

        observer(CompileEvent::Compiled {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
        Ok(())
    }
}

/// Write the compiled text atomically: into a tempfile next to the target,
/// then persisted over it. Parent directories are created as needed.
fn write_output(path: &Path, content: &str) -> NodeScriptResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => {
            fs::create_dir_all(p)?;
            p.to_path_buf()
        }
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| NodeScriptError::Io(e.error))?;
    Ok(())
}

fn copy_permissions(input: &Path, output: &Path) -> NodeScriptResult<()> {
    let permissions = fs::metadata(input)?.permissions();
    fs::set_permissions(output, permissions)?;
    Ok(())
}
