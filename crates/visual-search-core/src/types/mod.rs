//! Domain types for a search session.
//!
//! - [`ProbeInput`]: the image submitted as the query
//! - [`FilterCriteria`]: the four facet constraints applied locally
//! - [`ResultItem`]: one ranked candidate returned by the service
//! - [`SearchStatus`]: where the session is in its search lifecycle

mod criteria;
mod probe;
mod result_item;
mod status;

pub use criteria::{BaseColour, Category, FilterCriteria, Gender};
pub use probe::{ProbeFile, ProbeInput, ProbeKind, ACCEPTED_IMAGE_EXTENSIONS};
pub use result_item::{MatchTier, ResultItem};
pub use status::SearchStatus;
