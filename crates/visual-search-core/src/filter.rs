//! Local result filtering.
//!
//! [`ResultFilterEngine`] derives the displayed view from the cached raw
//! results. It is pure: the same raw results and criteria always produce the
//! same view, and it never reads the previously displayed view.

use tracing::debug;

use crate::config::constants::DEFAULT_DISPLAY_CAP;
use crate::types::{FilterCriteria, ResultItem};

/// Output of one filter application.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Matching results in raw order, capped to the display limit.
    pub displayed: Vec<ResultItem>,
    /// Number of matches before the display cap was applied.
    pub matched: usize,
}

impl FilteredView {
    /// True when the criteria excluded every cached result.
    pub fn no_match(&self) -> bool {
        self.matched == 0
    }
}

/// Applies [`FilterCriteria`] to a raw result set.
#[derive(Debug, Clone, Copy)]
pub struct ResultFilterEngine {
    display_cap: usize,
}

impl Default for ResultFilterEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_CAP)
    }
}

impl ResultFilterEngine {
    pub fn new(display_cap: usize) -> Self {
        Self { display_cap }
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    /// Filter `raw` by every set facet (AND), then keep the first
    /// `display_cap` matches.
    pub fn apply(&self, raw: &[ResultItem], criteria: &FilterCriteria) -> FilteredView {
        let matches: Vec<&ResultItem> = raw.iter().filter(|item| Self::matches(item, criteria)).collect();
        let matched = matches.len();
        let displayed: Vec<ResultItem> = matches
            .into_iter()
            .take(self.display_cap)
            .cloned()
            .collect();

        debug!(
            raw = raw.len(),
            matched,
            displayed = displayed.len(),
            "Applied filters {:?}",
            criteria
        );

        FilteredView { displayed, matched }
    }

    /// Whether `item` satisfies every set facet of `criteria`.
    ///
    /// Facets are checked gender, colour, category, then similarity.
    pub fn matches(item: &ResultItem, criteria: &FilterCriteria) -> bool {
        if let Some(gender) = criteria.gender {
            if item.gender != gender.as_str() {
                return false;
            }
        }
        if let Some(colour) = criteria.base_colour {
            if item.base_colour != colour.as_str() {
                return false;
            }
        }
        if let Some(category) = criteria.category {
            if item.master_category != category.as_str() {
                return false;
            }
        }
        if criteria.similarity_pct > 0 && !(item.similarity >= criteria.min_similarity()) {
            return false;
        }
        true
    }
}
