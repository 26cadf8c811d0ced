//! The watch session loop

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};

use crate::compile::{map_output, CompileEvent, CompileRequest, Compiler};
use crate::error::{NodeScriptError, NodeScriptResult};
use crate::traverse::source_files;
use crate::SOURCE_EXT;

use super::event::{DebounceState, WatchEvent, WatchKind, POLL_MS, SETTLE_MS, STARTUP_DRAIN_MS};

/// Timing knobs for the session; the defaults are the production values
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub settle: Duration,
    pub poll: Duration,
    pub startup_drain: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(SETTLE_MS),
            poll: Duration::from_millis(POLL_MS),
            startup_drain: Duration::from_millis(STARTUP_DRAIN_MS),
        }
    }
}

/// Watch the request's input root and recompile on every settled change.
///
/// Runs until `running` clears. Every compile goes through the engine's
/// injected policy, so with [`FailurePolicy::Report`](crate::FailurePolicy)
/// a bad edit is reported and the session stays alive.
pub fn watch(
    compiler: &Compiler,
    request: &CompileRequest,
    options: WatchOptions,
    running: Arc<AtomicBool>,
    observer: &mut dyn FnMut(CompileEvent),
) -> NodeScriptResult<()> {
    let root = request
        .input
        .canonicalize()
        .unwrap_or_else(|_| request.input.clone());

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| {
            if let Ok(event) = result {
                let kind = match event.kind {
                    EventKind::Create(_) => WatchKind::Add,
                    EventKind::Modify(_) => WatchKind::Change,
                    _ => return,
                };
                for path in event.paths {
                    let _ = tx.send(WatchEvent { path, kind });
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| NodeScriptError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&request.input, RecursiveMode::Recursive)
        .map_err(|e| NodeScriptError::Io(std::io::Error::other(e.to_string())))?;

    // Content hashes filter out events that did not change file contents
    // (editor auto-save noise); seeding from the current tree also keeps any
    // replayed startup events inert.
    let mut hashes = seed_hashes(&root);

    // Drain events notify replays for files that already existed when the
    // subscription was registered.
    let drain_end = Instant::now() + options.startup_drain;
    while Instant::now() < drain_end {
        let _ = rx.recv_timeout(options.poll);
    }

    let mut state = DebounceState::new(options.settle);

    while running.load(Ordering::SeqCst) {
        if let Ok(event) = rx.recv_timeout(options.poll) {
            let path = event.path.canonicalize().unwrap_or(event.path);

            if path == root {
                state.record(path);
            } else if has_source_ext(&path) && content_changed(&mut hashes, &path) {
                state.record(path);
            }
            // Everything else under the root is ignored.
        }

        if state.settled() {
            for path in state.take() {
                if path == root {
                    // The root itself was replaced: recompile the whole request.
                    compiler.compile(&request.input, &request.output, observer)?;
                } else {
                    let mapped = map_output(&root, &path, &request.output);
                    compiler.compile(&path, &mapped, observer)?;
                }
            }
        }
    }

    Ok(())
}

fn has_source_ext(path: &Path) -> bool {
    path.extension().map(|e| e == SOURCE_EXT).unwrap_or(false)
}

fn seed_hashes(root: &Path) -> HashMap<PathBuf, String> {
    let mut hashes = HashMap::new();
    if root.is_dir() {
        for path in source_files(root).flatten() {
            let path = path.canonicalize().unwrap_or(path);
            if let Ok(bytes) = fs::read(&path) {
                hashes.insert(path, content_hash(&bytes));
            }
        }
    }
    hashes
}

/// Re-hash the file and report whether its contents differ from the last
/// observation. Unreadable files are treated as unchanged.
fn content_changed(hashes: &mut HashMap<PathBuf, String>, path: &Path) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };
    let hash = content_hash(&bytes);
    if hashes.get(path) == Some(&hash) {
        return false;
    }
    hashes.insert(path.to_path_buf(), hash);
    true
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
