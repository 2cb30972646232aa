//! Search input state machine
//!
//! Owns the query text, the suggestion list and the loading flag of the
//! search box. Suggestion lookups are throttled and run as background tasks
//! that report back through a channel; every lookup is tagged so that a
//! reply arriving after the query changed is dropped instead of replacing
//! the list the user is looking at.
//!
//! ```text
//!   Idle ──text──▶ Typing ──reply──▶ SuggestionsShown
//!    ▲               │  ▲                  │
//!    │            submit └──────text───────┘
//!    │               ▼
//!    └──ok/tap─── Resolving
//! ```

use std::sync::Arc;
use std::time::Duration;

use domain::{Coordinate, SearchQuery, Suggestion};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::suggestion_throttler::{SuggestionThrottler, ThrottleDecision};
use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, NotificationPort};

/// Phase of the search box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// No list shown and nothing scheduled
    #[default]
    Idle,
    /// Query non-empty, lookup in flight or scheduled
    Typing,
    /// A non-empty suggestion list is shown
    SuggestionsShown,
    /// Explicit search submitted and awaiting the geocoder
    Resolving,
}

/// A finished suggestion lookup
#[derive(Debug, Clone)]
pub struct SuggestionReply {
    /// Tag of the lookup that produced this reply
    pub tag: u64,
    /// Query the lookup was issued for
    pub query: SearchQuery,
    /// Ranked suggestions
    pub suggestions: Vec<Suggestion>,
}

/// Result of an explicit search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    /// Query was empty; nothing happened
    Skipped,
    /// The place was found
    Resolved(Coordinate),
    /// The geocoder had no match; the user was alerted
    NotFound,
    /// The lookup failed; the user was alerted
    Failed,
}

/// Render-ready copy of the search box state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    /// Current text in the box
    pub query_text: String,
    /// Suggestions in display order
    pub suggestions: Vec<Suggestion>,
    /// Whether an explicit search is running
    pub is_loading: bool,
    /// Current phase
    pub phase: SearchPhase,
    /// Whether the box holds keyboard focus
    pub focused: bool,
}

/// Search box with throttled suggestions and explicit resolve
pub struct SearchInput {
    geocoder: Arc<dyn GeocodingPort>,
    notifier: Arc<dyn NotificationPort>,
    throttler: SuggestionThrottler<SearchQuery>,
    replies_tx: mpsc::UnboundedSender<SuggestionReply>,
    replies_rx: mpsc::UnboundedReceiver<SuggestionReply>,
    query_text: String,
    suggestions: Vec<Suggestion>,
    is_loading: bool,
    phase: SearchPhase,
    focused: bool,
    latest_tag: u64,
}

impl std::fmt::Debug for SearchInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchInput")
            .field("query_text", &self.query_text)
            .field("suggestions", &self.suggestions.len())
            .field("is_loading", &self.is_loading)
            .field("phase", &self.phase)
            .field("focused", &self.focused)
            .field("latest_tag", &self.latest_tag)
            .finish_non_exhaustive()
    }
}

impl SearchInput {
    /// Create an empty search box
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        notifier: Arc<dyn NotificationPort>,
        throttle_interval: Duration,
    ) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            geocoder,
            notifier,
            throttler: SuggestionThrottler::new(throttle_interval),
            replies_tx,
            replies_rx,
            query_text: String::new(),
            suggestions: Vec::new(),
            is_loading: false,
            phase: SearchPhase::Idle,
            focused: false,
            latest_tag: 0,
        }
    }

    /// Current text in the box
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Suggestions in display order
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Whether an explicit search is running
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current phase
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether the box holds keyboard focus
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// When the next deferred lookup becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttler.next_deadline()
    }

    /// Render-ready copy of the state
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query_text: self.query_text.clone(),
            suggestions: self.suggestions.clone(),
            is_loading: self.is_loading,
            phase: self.phase,
            focused: self.focused,
        }
    }

    /// The user edited the text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
        self.focused = true;

        let Some(query) = SearchQuery::parse(&self.query_text) else {
            debug!("Query cleared");
            self.suggestions.clear();
            self.throttler.cancel();
            self.invalidate_in_flight();
            self.phase = SearchPhase::Idle;
            return;
        };

        self.phase = SearchPhase::Typing;
        match self.throttler.submit(query, Instant::now()) {
            ThrottleDecision::Run(query) => self.dispatch(query),
            ThrottleDecision::Deferred { due } => debug!(?due, "Suggestion lookup deferred"),
        }
    }

    /// Run the deferred lookup if its window has closed
    ///
    /// Returns true if a lookup was dispatched.
    pub fn fire_due_suggestion(&mut self) -> bool {
        match self.throttler.poll(Instant::now()) {
            Some(query) => {
                self.dispatch(query);
                true
            },
            None => false,
        }
    }

    /// Wait for the next finished lookup
    pub async fn next_reply(&mut self) -> Option<SuggestionReply> {
        self.replies_rx.recv().await
    }

    /// Apply a finished lookup unless it is stale
    ///
    /// Returns true if the suggestion list was replaced.
    pub fn apply_reply(&mut self, reply: SuggestionReply) -> bool {
        if reply.tag != self.latest_tag || !reply.query.matches_input(&self.query_text) {
            debug!(
                tag = reply.tag,
                latest = self.latest_tag,
                query = %reply.query,
                "Discarding stale suggestions"
            );
            return false;
        }

        self.suggestions = reply.suggestions;
        self.phase = if self.suggestions.is_empty() {
            SearchPhase::Typing
        } else {
            SearchPhase::SuggestionsShown
        };
        debug!(count = self.suggestions.len(), "Suggestions updated");
        true
    }

    /// Explicit search (enter key or search icon)
    #[instrument(skip(self), fields(query = %self.query_text.trim()))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(query) = SearchQuery::parse(&self.query_text) else {
            debug!("Ignoring empty search");
            return SubmitOutcome::Skipped;
        };

        let previous_phase = self.phase;
        self.phase = SearchPhase::Resolving;
        self.is_loading = true;
        let result = self.geocoder.resolve(&query).await;
        self.is_loading = false;

        match result {
            Ok(coordinate) => {
                debug!(%coordinate, "Search resolved");
                self.close_list();
                SubmitOutcome::Resolved(coordinate)
            },
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Search failed");
                self.notifier.alert(&e.user_alert());
                self.phase = previous_phase;
                if matches!(e, ApplicationError::NotFound(_)) {
                    SubmitOutcome::NotFound
                } else {
                    SubmitOutcome::Failed
                }
            },
        }
    }

    /// The user tapped the suggestion at `index`
    ///
    /// Returns the chosen coordinate, or `None` if there is no such entry.
    pub fn select_suggestion(&mut self, index: usize) -> Option<Coordinate> {
        let chosen = self.suggestions.get(index)?.clone();
        debug!(label = %chosen.label, "Suggestion selected");
        self.query_text = chosen.label;
        self.close_list();
        self.focused = false;
        Some(chosen.coordinate)
    }

    /// Tap outside the box: close the list and drop focus, keep the text
    pub fn dismiss(&mut self) {
        self.close_list();
        self.focused = false;
    }

    /// Drop keyboard focus only
    pub fn release_focus(&mut self) {
        self.focused = false;
    }

    /// Back to an empty box (the box was hidden)
    pub fn reset(&mut self) {
        self.query_text.clear();
        self.close_list();
        self.is_loading = false;
        self.focused = false;
    }

    fn close_list(&mut self) {
        self.suggestions.clear();
        self.throttler.cancel();
        self.invalidate_in_flight();
        self.phase = SearchPhase::Idle;
    }

    /// Make every reply from an already dispatched lookup stale
    fn invalidate_in_flight(&mut self) {
        self.latest_tag += 1;
    }

    fn dispatch(&mut self, query: SearchQuery) {
        self.latest_tag += 1;
        let tag = self.latest_tag;
        let geocoder = Arc::clone(&self.geocoder);
        let replies = self.replies_tx.clone();

        debug!(tag, %query, "Dispatching suggestion lookup");
        tokio::spawn(async move {
            let suggestions = geocoder.suggest(&query).await;
            if replies
                .send(SuggestionReply {
                    tag,
                    query,
                    suggestions,
                })
                .is_err()
            {
                debug!(tag, "Search input gone, dropping suggestions");
            }
        });
    }
}
