//! Search request orchestration.
//!
//! A search runs in three steps so that a caller can keep using the session
//! while the request is in flight:
//!
//! 1. [`SearchRequestOrchestrator::begin`] validates the probe, moves the
//!    state to `Loading`, clears stale results and returns a
//!    [`PendingSearch`] tagged with a fresh sequence number.
//! 2. [`PendingSearch::run`] performs the single backend call. It owns
//!    everything it needs and borrows nothing from the session.
//! 3. [`SearchRequestOrchestrator::complete`] applies the outcome, unless
//!    the state has since moved on to another sequence number, in which case
//!    the outcome is discarded as stale.
//!
//! [`SearchRequestOrchestrator::submit`] chains the three for callers that
//! simply await the search.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::{ClientResult, ProbePayload, SearchBackend, SearchRequest};
use crate::config::constants::{DEFAULT_DISPLAY_CAP, DEFAULT_RAW_RESULT_CAP};
use crate::error::{SessionError, SessionResult, MSG_FETCH_FAILED, MSG_NO_PROBE_SUPPLIED};
use crate::types::{FilterCriteria, ProbeInput, ResultItem, SearchStatus};
use crate::url::{TrimNormalizer, UrlNormalizer};

// =============================================================================
// SEARCH STATE
// =============================================================================

/// Result-side state of a session: cache, view, status and message.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) raw_results: Vec<ResultItem>,
    pub(crate) displayed_results: Vec<ResultItem>,
    pub(crate) status: SearchStatus,
    pub(crate) error_message: Option<String>,
    /// Sequence number whose completion will be accepted.
    pub(crate) expected_seq: u64,
    pub(crate) last_searched_at: Option<DateTime<Utc>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_results(&self) -> &[ResultItem] {
        &self.raw_results
    }

    pub fn displayed_results(&self) -> &[ResultItem] {
        &self.displayed_results
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn expected_seq(&self) -> u64 {
        self.expected_seq
    }

    pub fn last_searched_at(&self) -> Option<DateTime<Utc>> {
        self.last_searched_at
    }

    /// Return to `Idle` with nothing cached.
    ///
    /// Advances the expected sequence so a search still in flight is
    /// discarded when it completes.
    pub fn reset(&mut self) {
        self.raw_results.clear();
        self.displayed_results.clear();
        self.error_message = None;
        self.status = SearchStatus::Idle;
        self.expected_seq += 1;
    }
}

// =============================================================================
// IN-FLIGHT SEARCH
// =============================================================================

/// A search that has been started but not yet sent.
pub struct PendingSearch {
    request: SearchRequest,
    backend: Arc<dyn SearchBackend>,
}

impl PendingSearch {
    pub fn seq(&self) -> u64 {
        self.request.seq
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Issue the request. Exactly one backend call, no retries.
    pub async fn run(self) -> CompletedSearch {
        let seq = self.request.seq;
        let outcome = self.backend.search(self.request).await;
        CompletedSearch { seq, outcome }
    }
}

/// Outcome of a backend call, still tagged with its sequence number.
#[derive(Debug)]
pub struct CompletedSearch {
    pub seq: u64,
    pub outcome: ClientResult<Vec<ResultItem>>,
}

/// How a completion was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The results were stored and the status moved to `Success`.
    Applied,
    /// A newer search or a reset superseded this one; nothing changed.
    Stale,
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

/// Validates probes, builds requests and folds responses into [`SearchState`].
pub struct SearchRequestOrchestrator {
    backend: Arc<dyn SearchBackend>,
    normalizer: Arc<dyn UrlNormalizer>,
    raw_result_cap: usize,
    display_cap: usize,
}

impl SearchRequestOrchestrator {
    /// Create an orchestrator with the default caps and URL normalizer.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            normalizer: Arc::new(TrimNormalizer),
            raw_result_cap: DEFAULT_RAW_RESULT_CAP,
            display_cap: DEFAULT_DISPLAY_CAP,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn UrlNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set how many results are cached and how many are initially displayed.
    ///
    /// Both caps are clamped to the defaults, which are also the upper
    /// bounds, and the display cap never exceeds the raw cap.
    pub fn with_caps(mut self, raw_result_cap: usize, display_cap: usize) -> Self {
        self.raw_result_cap = raw_result_cap.min(DEFAULT_RAW_RESULT_CAP);
        self.display_cap = display_cap.min(DEFAULT_DISPLAY_CAP).min(self.raw_result_cap);
        self
    }

    pub fn raw_result_cap(&self) -> usize {
        self.raw_result_cap
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    /// Start a search.
    ///
    /// Fails without touching the backend when there is no probe; the
    /// message is left in the state and the status is unchanged.
    pub fn begin(
        &self,
        state: &mut SearchState,
        probe: &ProbeInput,
        criteria: &FilterCriteria,
    ) -> SessionResult<PendingSearch> {
        let payload = match probe {
            ProbeInput::None => {
                state.error_message = Some(MSG_NO_PROBE_SUPPLIED.to_string());
                return Err(SessionError::validation(MSG_NO_PROBE_SUPPLIED));
            }
            ProbeInput::File(file) => ProbePayload::File {
                file_name: file.file_name().to_string(),
                mime_type: file.mime_type(),
                bytes: file.bytes().to_vec(),
            },
            ProbeInput::Url(raw) => ProbePayload::ImageUrl(self.normalizer.normalize(raw)),
        };

        state.expected_seq += 1;
        state.status = SearchStatus::Loading;
        state.raw_results.clear();
        state.displayed_results.clear();
        state.error_message = None;

        let request = SearchRequest {
            seq: state.expected_seq,
            probe: payload,
            filters_json: criteria.to_wire_json(),
        };
        info!(seq = request.seq, probe = ?request.probe, "Search started");

        Ok(PendingSearch {
            request,
            backend: Arc::clone(&self.backend),
        })
    }

    /// Fold a completed search into the state.
    ///
    /// Returns `Err(SessionError::Transport)` when the accepted completion
    /// carried a failure. Stale completions are never errors.
    pub fn complete(
        &self,
        state: &mut SearchState,
        completed: CompletedSearch,
    ) -> SessionResult<Completion> {
        if completed.seq != state.expected_seq {
            warn!(
                seq = completed.seq,
                expected = state.expected_seq,
                "Discarding stale search response"
            );
            return Ok(Completion::Stale);
        }

        match completed.outcome {
            Ok(mut items) => {
                let received = items.len();
                items.truncate(self.raw_result_cap);
                state.displayed_results = items.iter().take(self.display_cap()).cloned().collect();
                state.raw_results = items;
                state.status = SearchStatus::Success;
                state.error_message = None;
                state.last_searched_at = Some(Utc::now());
                info!(
                    seq = completed.seq,
                    received,
                    cached = state.raw_results.len(),
                    displayed = state.displayed_results.len(),
                    "Search completed"
                );
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(seq = completed.seq, error = %e, "Search request failed");
                state.raw_results.clear();
                state.displayed_results.clear();
                state.status = SearchStatus::Error;
                state.error_message = Some(MSG_FETCH_FAILED.to_string());
                Err(SessionError::Transport)
            }
        }
    }

    /// Begin, run and complete a search in one call.
    pub async fn submit(
        &self,
        state: &mut SearchState,
        probe: &ProbeInput,
        criteria: &FilterCriteria,
    ) -> SessionResult<Completion> {
        let pending = self.begin(state, probe, criteria)?;
        let completed = pending.run().await;
        self.complete(state, completed)
    }
}
