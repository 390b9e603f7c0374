//! Search session aggregate.
//!
//! [`SearchSession`] is the state the presentation layer reads and the only
//! thing it writes through. It owns the probe input, the filter criteria,
//! the raw result cache and the displayed view, and routes each user action
//! to the component responsible for it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::{ClientResult, HttpSearchClient};
use crate::config::Config;
use crate::error::{SessionError, SessionResult, MSG_NO_MATCHING_RESULTS, MSG_NO_PROBE_ACTIVE};
use crate::filter::ResultFilterEngine;
use crate::input_mode::{InputModeController, ModeChange};
use crate::orchestrator::{
    CompletedSearch, Completion, PendingSearch, SearchRequestOrchestrator, SearchState,
};
use crate::types::{FilterCriteria, ProbeFile, ProbeInput, ProbeKind, ResultItem, SearchStatus};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub probe: ProbeKind,
    pub file_enabled: bool,
    pub url_enabled: bool,
    pub criteria: FilterCriteria,
    pub status: SearchStatus,
    pub error_message: Option<String>,
    pub raw_count: usize,
    pub displayed: Vec<ResultItem>,
    pub last_searched_at: Option<DateTime<Utc>>,
}

/// One user's search session.
pub struct SearchSession {
    id: Uuid,
    input: InputModeController,
    criteria: FilterCriteria,
    state: SearchState,
    engine: ResultFilterEngine,
    orchestrator: SearchRequestOrchestrator,
}

impl SearchSession {
    /// Create an idle session around an orchestrator.
    pub fn new(orchestrator: SearchRequestOrchestrator) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Created search session");
        Self {
            id,
            input: InputModeController::new(),
            criteria: FilterCriteria::default(),
            state: SearchState::new(),
            engine: ResultFilterEngine::new(orchestrator.display_cap()),
            orchestrator,
        }
    }

    /// Create a session that talks to the configured HTTP service.
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let client = HttpSearchClient::new(&config.service)?;
        let orchestrator = SearchRequestOrchestrator::new(Arc::new(client))
            .with_caps(config.limits.raw_result_cap, config.limits.display_cap);
        Ok(Self::new(orchestrator))
    }

    // -------------------------------------------------------------------------
    // Probe input
    // -------------------------------------------------------------------------

    /// Select a file probe. Refused while a URL is entered.
    pub fn set_file(&mut self, file: ProbeFile) -> SessionResult<()> {
        let change = self.input.set_file(file)?;
        self.apply_mode_change(change);
        Ok(())
    }

    /// Edit the URL probe. Refused while a file is selected; blank text
    /// resets the session.
    pub fn set_url(&mut self, text: &str) -> SessionResult<()> {
        let change = self.input.set_url(text)?;
        self.apply_mode_change(change);
        Ok(())
    }

    /// Drop the selected file and reset the session.
    pub fn remove_file(&mut self) {
        let change = self.input.remove_file();
        self.apply_mode_change(change);
    }

    /// Clear the probe and every derived piece of state.
    pub fn clear(&mut self) {
        let change = self.input.clear();
        self.apply_mode_change(change);
    }

    fn apply_mode_change(&mut self, change: ModeChange) {
        if change == ModeChange::Reset {
            info!(session_id = %self.id, "Session reset");
            self.state.reset();
        }
    }

    // -------------------------------------------------------------------------
    // Criteria and filtering
    // -------------------------------------------------------------------------

    /// Store new criteria. The view is not re-derived until
    /// [`apply_filters`](Self::apply_filters) is called.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Re-derive the displayed view from the raw cache and current criteria.
    ///
    /// Returns the number of matches before the display cap. Zero matches is
    /// not an error: the view is emptied and an informational message set.
    /// The status never changes.
    pub fn apply_filters(&mut self) -> SessionResult<usize> {
        if !self.input.has_probe() {
            self.state.error_message = Some(MSG_NO_PROBE_ACTIVE.to_string());
            return Err(SessionError::validation(MSG_NO_PROBE_ACTIVE));
        }

        let view = self.engine.apply(&self.state.raw_results, &self.criteria);
        self.state.error_message = if view.no_match() {
            Some(MSG_NO_MATCHING_RESULTS.to_string())
        } else {
            None
        };
        self.state.displayed_results = view.displayed;
        Ok(view.matched)
    }

    // -------------------------------------------------------------------------
    // Searching
    // -------------------------------------------------------------------------

    /// Run a search to completion.
    pub async fn submit(&mut self) -> SessionResult<Completion> {
        let pending = self.begin_search()?;
        let completed = pending.run().await;
        self.complete_search(completed)
    }

    /// Start a search and hand back the request to run.
    ///
    /// The session stays usable while the returned [`PendingSearch`] runs.
    /// Pass its [`CompletedSearch`] to [`complete_search`](Self::complete_search).
    pub fn begin_search(&mut self) -> SessionResult<PendingSearch> {
        let probe = self.input.probe();
        let pending = self.orchestrator.begin(&mut self.state, &probe, &self.criteria)?;
        debug!(session_id = %self.id, seq = pending.seq(), "Search pending");
        Ok(pending)
    }

    /// Apply a finished search unless it has been superseded.
    pub fn complete_search(&mut self, completed: CompletedSearch) -> SessionResult<Completion> {
        self.orchestrator.complete(&mut self.state, completed)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn probe(&self) -> ProbeInput {
        self.input.probe()
    }

    pub fn input(&self) -> &InputModeController {
        &self.input
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn status(&self) -> SearchStatus {
        self.state.status()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn raw_results(&self) -> &[ResultItem] {
        self.state.raw_results()
    }

    pub fn displayed_results(&self) -> &[ResultItem] {
        self.state.displayed_results()
    }

    pub fn last_searched_at(&self) -> Option<DateTime<Utc>> {
        self.state.last_searched_at()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            probe: self.input.probe().kind(),
            file_enabled: self.input.is_file_enabled(),
            url_enabled: self.input.is_url_enabled(),
            criteria: self.criteria.clone(),
            status: self.state.status(),
            error_message: self.state.error_message.clone(),
            raw_count: self.state.raw_results.len(),
            displayed: self.state.displayed_results.clone(),
            last_searched_at: self.state.last_searched_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::stubs::{sample_results, ScriptedBackend};
    use crate::types::{Category, Gender};

    fn session_with(backend: &Arc<ScriptedBackend>) -> SearchSession {
        SearchSession::new(SearchRequestOrchestrator::new(backend.clone()))
    }

    fn url() -> &'static str {
        "https://cdn.example.com/probe.jpg"
    }

    fn file() -> ProbeFile {
        ProbeFile::new("probe.webp", vec![0x52, 0x49, 0x46, 0x46]).unwrap()
    }

    fn item(id: &str, gender: &str, similarity: f64) -> ResultItem {
        ResultItem {
            id: Some(id.to_string()),
            display_name: id.to_uppercase(),
            gender: gender.to_string(),
            base_colour: "Black".into(),
            master_category: "Apparel".into(),
            similarity,
            image_url: format!("https://cdn.example.com/{}.jpg", id),
        }
    }

    async fn searched_session(items: Vec<ResultItem>) -> (Arc<ScriptedBackend>, SearchSession) {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok(items);
        let mut session = session_with(&backend);
        session.set_url(url()).unwrap();
        session.submit().await.unwrap();
        (backend, session)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    #[test]
    fn test_initial_state() {
        let backend = Arc::new(ScriptedBackend::new());
        let session = session_with(&backend);

        assert_eq!(session.status(), SearchStatus::Idle);
        assert_eq!(session.probe(), ProbeInput::None);
        assert!(session.raw_results().is_empty());
        assert!(session.displayed_results().is_empty());
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn test_submit_without_probe() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut session = session_with(&backend);

        let err = session.submit().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(session.status(), SearchStatus::Idle);
        assert_eq!(session.error_message(), Some("no probe supplied"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_search_of_twenty_items() {
        let (_, session) = searched_session(sample_results(20)).await;

        assert_eq!(session.status(), SearchStatus::Success);
        assert_eq!(session.raw_results(), &sample_results(20)[..16]);
        assert_eq!(session.displayed_results(), &sample_results(20)[..12]);
        assert!(session.criteria().is_unconstrained());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(ClientError::Request("connection refused".into()));
        let mut session = session_with(&backend);
        session.set_file(file()).unwrap();

        assert_eq!(session.submit().await, Err(SessionError::Transport));
        assert_eq!(session.status(), SearchStatus::Error);
        assert_eq!(session.error_message(), Some("fetch failed"));
        assert!(session.raw_results().is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_recovers() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(ClientError::Request("timeout".into()));
        backend.push_ok(sample_results(3));
        let mut session = session_with(&backend);
        session.set_url(url()).unwrap();

        assert!(session.submit().await.is_err());
        assert_eq!(session.submit().await, Ok(Completion::Applied));
        assert_eq!(session.status(), SearchStatus::Success);
        assert!(session.error_message().is_none());
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let (_, mut session) = searched_session(sample_results(8)).await;
        session.set_criteria(FilterCriteria::new().with_gender(Gender::Men));
        session.apply_filters().unwrap();

        session.clear();

        assert_eq!(session.status(), SearchStatus::Idle);
        assert_eq!(session.probe(), ProbeInput::None);
        assert!(session.raw_results().is_empty());
        assert!(session.displayed_results().is_empty());
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn test_blank_url_resets_results() {
        let (_, mut session) = searched_session(sample_results(8)).await;

        session.set_url("   ").unwrap();

        assert_eq!(session.status(), SearchStatus::Idle);
        assert!(session.raw_results().is_empty());
        assert!(session.displayed_results().is_empty());
    }

    #[tokio::test]
    async fn test_editing_url_keeps_results() {
        let (_, mut session) = searched_session(sample_results(8)).await;

        session.set_url("https://cdn.example.com/other.jpg").unwrap();

        assert_eq!(session.status(), SearchStatus::Success);
        assert_eq!(session.raw_results().len(), 8);
    }

    #[tokio::test]
    async fn test_remove_file_resets_results() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok(sample_results(5));
        let mut session = session_with(&backend);
        session.set_file(file()).unwrap();
        session.submit().await.unwrap();

        session.remove_file();

        assert_eq!(session.status(), SearchStatus::Idle);
        assert!(session.raw_results().is_empty());
        assert!(session.input().is_url_enabled());
    }

    #[test]
    fn test_mode_conflicts_are_refused() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut session = session_with(&backend);

        session.set_file(file()).unwrap();
        assert!(session.set_url(url()).unwrap_err().is_validation());
        assert_eq!(session.probe().kind(), ProbeKind::File);

        session.remove_file();
        session.set_url(url()).unwrap();
        assert!(session.set_file(file()).unwrap_err().is_validation());
        assert_eq!(session.probe().kind(), ProbeKind::Url);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    #[tokio::test]
    async fn test_gender_filter_selects_exact_matches() {
        let items = vec![
            item("a", "Men", 0.9),
            item("b", "Women", 0.9),
            item("c", "Men", 0.8),
            item("d", "Unisex", 0.8),
            item("e", "Women", 0.7),
            item("f", "Men", 0.7),
            item("g", "Men", 0.6),
            item("h", "Women", 0.6),
            item("i", "Unisex", 0.5),
            item("j", "Men", 0.5),
        ];
        let (_, mut session) = searched_session(items).await;

        session.set_criteria(FilterCriteria::new().with_gender(Gender::Women));
        assert_eq!(session.apply_filters(), Ok(3));

        let ids: Vec<&str> = session
            .displayed_results()
            .iter()
            .filter_map(|i| i.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["b", "e", "h"]);
        assert!(session.error_message().is_none());
    }

    #[tokio::test]
    async fn test_threshold_excluding_everything() {
        let items: Vec<ResultItem> = (0..5).map(|i| item(&format!("x{}", i), "Men", 0.3 + i as f64 * 0.04)).collect();
        let (_, mut session) = searched_session(items).await;

        session.set_criteria(FilterCriteria::new().with_similarity_pct(60).unwrap());
        assert_eq!(session.apply_filters(), Ok(0));

        assert!(session.displayed_results().is_empty());
        assert_eq!(session.error_message(), Some("no results match filters"));
        assert_eq!(session.status(), SearchStatus::Success);
        assert_eq!(session.raw_results().len(), 5, "raw cache survives a no-match");
    }

    #[tokio::test]
    async fn test_relaxing_filters_recovers_without_new_request() {
        let (backend, mut session) = searched_session(sample_results(16)).await;

        session.set_criteria(FilterCriteria::new().with_similarity_pct(100).unwrap());
        session.apply_filters().unwrap();
        session.set_criteria(FilterCriteria::new().with_category(Category::Footwear));
        assert_eq!(session.apply_filters(), Ok(4));

        assert!(session.error_message().is_none());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_filters_derive_from_full_cache_not_view() {
        let (_, mut session) = searched_session(sample_results(16)).await;

        session.set_criteria(FilterCriteria::new().with_gender(Gender::Men));
        session.apply_filters().unwrap();
        session.set_criteria(FilterCriteria::new());
        assert_eq!(session.apply_filters(), Ok(16));
        assert_eq!(session.displayed_results(), &sample_results(16)[..12]);
    }

    #[tokio::test]
    async fn test_apply_twice_is_identical() {
        let (_, mut session) = searched_session(sample_results(16)).await;
        session.set_criteria(
            FilterCriteria::new()
                .with_gender(Gender::Unisex)
                .with_similarity_pct(30)
                .unwrap(),
        );

        session.apply_filters().unwrap();
        let first = session.displayed_results().to_vec();
        session.apply_filters().unwrap();
        assert_eq!(session.displayed_results(), &first[..]);
    }

    #[test]
    fn test_apply_without_probe() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut session = session_with(&backend);

        let err = session.apply_filters().unwrap_err();
        assert_eq!(err.to_string(), "no probe active");
        assert_eq!(session.error_message(), Some("no probe active"));
        assert_eq!(session.status(), SearchStatus::Idle);
    }

    #[tokio::test]
    async fn test_criteria_are_sent_with_request() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok(Vec::new());
        let mut session = session_with(&backend);
        session.set_url(url()).unwrap();
        session.set_criteria(FilterCriteria::new().with_gender(Gender::Women));

        session.submit().await.unwrap();

        let sent: serde_json::Value =
            serde_json::from_str(&backend.requests()[0].filters_json).unwrap();
        assert_eq!(sent["gender"], "Women");
    }

    // =========================================================================
    // Overlapping searches
    // =========================================================================

    #[tokio::test]
    async fn test_clear_while_in_flight_discards_response() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok(sample_results(6));
        let mut session = session_with(&backend);
        session.set_url(url()).unwrap();

        let pending = session.begin_search().unwrap();
        assert_eq!(session.status(), SearchStatus::Loading);
        session.clear();
        let done = pending.run().await;

        assert_eq!(session.complete_search(done), Ok(Completion::Stale));
        assert_eq!(session.status(), SearchStatus::Idle);
        assert!(session.raw_results().is_empty());
    }

    #[tokio::test]
    async fn test_only_latest_of_overlapping_submits_applies() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok(sample_results(2));
        backend.push_ok(sample_results(9));
        let mut session = session_with(&backend);
        session.set_url(url()).unwrap();

        let first = session.begin_search().unwrap();
        let second = session.begin_search().unwrap();
        let (first_done, second_done) = (first.run().await, second.run().await);

        assert_eq!(session.complete_search(second_done), Ok(Completion::Applied));
        assert_eq!(session.complete_search(first_done), Ok(Completion::Stale));
        assert_eq!(session.raw_results().len(), 9);
    }

    #[tokio::test]
    async fn test_view_snapshot() {
        let (_, session) = searched_session(sample_results(14)).await;
        let view = session.view();

        assert_eq!(view.session_id, session.id());
        assert_eq!(view.probe, ProbeKind::Url);
        assert!(!view.file_enabled);
        assert!(view.url_enabled);
        assert_eq!(view.raw_count, 14);
        assert_eq!(view.displayed.len(), 12);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["probe"], "url");
    }
}
