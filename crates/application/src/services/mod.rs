//! Application services
//!
//! The map screen's behavior, layered bottom-up: the throttle, the search
//! input that uses it, the stateless map renderer, the shell that owns
//! them all, and the event loop driving the shell.

mod app_shell;
mod map_viewer;
mod search_input;
mod shell_runtime;
mod suggestion_throttler;

pub use app_shell::{AppShell, ShellConfig};
pub use map_viewer::{MapMarker, MapScene, MapViewer, SELECTED_MARKER_TITLE};
pub use search_input::{SearchInput, SearchPhase, SearchSnapshot, SubmitOutcome, SuggestionReply};
pub use shell_runtime::{ShellCommand, ShellRuntime, ShellSnapshot};
pub use suggestion_throttler::{DEFAULT_THROTTLE_INTERVAL, SuggestionThrottler, ThrottleDecision};
