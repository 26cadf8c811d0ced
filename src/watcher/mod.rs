//! Continuous recompilation on filesystem changes
//!
//! The session subscribes to add/change events under the input root,
//! debounces bursts of writes until the filesystem settles, and re-invokes
//! the compile engine for the affected files. Failures are reported through
//! the engine's observer and never end the session.

mod event;
mod session;

pub use event::{DebounceState, WatchEvent, WatchKind, POLL_MS, SETTLE_MS, STARTUP_DRAIN_MS};
pub use session::{watch, WatchOptions};
