//! Event loop driving the map screen
//!
//! Multiplexes user commands, finished suggestion lookups and the throttle
//! deadline onto one task, and publishes a fresh [`ShellSnapshot`] after
//! every event that changed something.

use domain::{TransportMode, ViewState};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info};

use super::app_shell::AppShell;
use super::map_viewer::MapScene;
use super::search_input::SearchSnapshot;

/// A user interaction with the map screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Replace the search box text
    TypeQuery(String),
    /// Enter key or search icon
    SubmitSearch,
    /// Tap on the suggestion at this index
    SelectSuggestion(usize),
    /// Tap outside the search box
    DismissSuggestions,
    /// Tap on the map background
    TapBackground,
    /// Search ⇄ directions button
    ToggleViewMode,
    /// Layer button
    ToggleMapLayer,
    /// Transport selector
    SelectTransportMode(TransportMode),
    /// Directions origin field
    EditOrigin(String),
    /// Directions destination field
    EditDestination(String),
    /// Recenter button
    Recenter,
    /// Stop the loop
    Quit,
}

/// Everything a front end needs to draw the screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellSnapshot {
    /// Toggle state
    pub view: ViewState,
    /// Search box state
    pub search: SearchSnapshot,
    /// Map widget description
    pub scene: MapScene,
}

impl ShellSnapshot {
    fn capture(shell: &AppShell) -> Self {
        Self {
            view: shell.view().clone(),
            search: shell.search_snapshot(),
            scene: shell.scene(),
        }
    }
}

/// Single-task driver for an [`AppShell`]
#[derive(Debug)]
pub struct ShellRuntime {
    shell: AppShell,
    snapshots: watch::Sender<ShellSnapshot>,
}

impl ShellRuntime {
    /// Wrap a shell; the receiver sees the initial state immediately
    pub fn new(shell: AppShell) -> (Self, watch::Receiver<ShellSnapshot>) {
        let (snapshots, rx) = watch::channel(ShellSnapshot::capture(&shell));
        (Self { shell, snapshots }, rx)
    }

    /// The wrapped shell
    pub const fn shell(&self) -> &AppShell {
        &self.shell
    }

    /// Apply one command and publish the result
    pub async fn handle(&mut self, command: ShellCommand) {
        debug!(?command, "Handling command");
        match command {
            ShellCommand::TypeQuery(text) => self.shell.type_query(text),
            ShellCommand::SubmitSearch => {
                self.shell.submit_search().await;
            },
            ShellCommand::SelectSuggestion(index) => {
                self.shell.select_suggestion(index);
            },
            ShellCommand::DismissSuggestions => self.shell.dismiss_suggestions(),
            ShellCommand::TapBackground => self.shell.tap_background(),
            ShellCommand::ToggleViewMode => self.shell.toggle_view_mode(),
            ShellCommand::ToggleMapLayer => self.shell.toggle_map_layer(),
            ShellCommand::SelectTransportMode(mode) => self.shell.select_transport_mode(mode),
            ShellCommand::EditOrigin(text) => self.shell.edit_origin(text),
            ShellCommand::EditDestination(text) => self.shell.edit_destination(text),
            ShellCommand::Recenter => {
                self.shell.recenter().await;
            },
            ShellCommand::Quit => {},
        }
        self.publish();
    }

    /// Run until `Quit` or until the command channel closes
    ///
    /// Returns the shell in its final state.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ShellCommand>) -> AppShell {
        info!("Map screen started");
        loop {
            let deadline = self.shell.search().next_deadline();
            tokio::select! {
                command = commands.recv() => match command {
                    Some(ShellCommand::Quit) | None => break,
                    Some(command) => self.handle(command).await,
                },
                Some(reply) = self.shell.search_mut().next_reply() => {
                    if self.shell.search_mut().apply_reply(reply) {
                        self.publish();
                    }
                },
                () = wait_until(deadline) => {
                    if self.shell.search_mut().fire_due_suggestion() {
                        self.publish();
                    }
                },
            }
        }
        info!("Map screen stopped");
        self.shell
    }

    fn publish(&self) {
        let snapshot = ShellSnapshot::capture(&self.shell);
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
