//! Visual Search Core - Search Orchestration and Result Filtering
//!
//! This crate drives a single visual-similarity search session: a probe image
//! (uploaded file or remote URL) is sent to an external search service, the
//! ranked candidates are cached, and a bounded view is derived locally from
//! facet filters without contacting the service again.
//!
//! # Architecture
//!
//! ```text
//! +-------------+    +---------------+    +-------------+    +-------------+
//! | InputMode   | -> | Orchestrator  | -> |  Raw cache  | -> |  Filter     |
//! | Controller  |    | (SearchBackend)|   |  (<= 16)    |    |  Engine     |
//! +-------------+    +---------------+    +-------------+    +-------------+
//!       |                   |                                      |
//!       v                   v                                      v
//!   ProbeInput        multipart POST                       displayed (<= 12)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use visual_search_core::{Config, SearchSession};
//!
//! let config = Config::load()?;
//! let mut session = SearchSession::from_config(&config)?;
//! session.set_url("https://cdn.example.com/shirt.jpg")?;
//! session.submit().await?;
//! for item in session.displayed_results() {
//!     println!("{} ({}%)", item.display_name, item.similarity_percent());
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod input_mode;
pub mod orchestrator;
pub mod session;
pub mod types;
pub mod url;

#[cfg(any(test, feature = "test-utils"))]
pub mod stubs;

pub use client::{ClientError, ClientResult, HttpSearchClient, ProbePayload, SearchBackend, SearchRequest};
pub use config::Config;
pub use error::{ConfigError, ConfigResult, SessionError, SessionResult};
pub use filter::{FilteredView, ResultFilterEngine};
pub use input_mode::{InputModeController, ModeChange};
pub use orchestrator::{Completion, CompletedSearch, PendingSearch, SearchRequestOrchestrator, SearchState};
pub use session::{SearchSession, SessionView};
pub use types::{
    BaseColour, Category, FilterCriteria, Gender, MatchTier, ProbeFile, ProbeInput, ProbeKind,
    ResultItem, SearchStatus,
};
pub use url::{TrimNormalizer, UrlNormalizer};
