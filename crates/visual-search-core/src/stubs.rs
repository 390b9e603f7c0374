//! Scripted search backend for tests.
//!
//! Available under `cfg(test)` and with the `test-utils` feature. Responses
//! are returned in the order they were pushed; every request is recorded.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{ClientError, ClientResult, SearchBackend, SearchRequest};
use crate::types::ResultItem;

/// In-memory [`SearchBackend`] returning queued outcomes.
#[derive(Default)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<ClientResult<Vec<ResultItem>>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, items: Vec<ResultItem>) {
        self.outcomes.lock().push_back(Ok(items));
    }

    pub fn push_err(&self, error: ClientError) {
        self.outcomes.lock().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, request: SearchRequest) -> ClientResult<Vec<ResultItem>> {
        self.requests.lock().push(request);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Request("no scripted response left".into())))
    }
}

/// `count` results in rank order with descending similarity.
///
/// Facets cycle so that every gender, several colours and every category
/// appear: item `i` has gender `[Men, Women, Unisex][i % 3]`, colour
/// `[Black, White, Blue, Red][i % 4]` and category
/// `[Apparel, Accessories, Footwear, Sporting Goods][i % 4]`.
pub fn sample_results(count: usize) -> Vec<ResultItem> {
    const GENDERS: [&str; 3] = ["Men", "Women", "Unisex"];
    const COLOURS: [&str; 4] = ["Black", "White", "Blue", "Red"];
    const CATEGORIES: [&str; 4] = ["Apparel", "Accessories", "Footwear", "Sporting Goods"];

    (0..count)
        .map(|i| ResultItem {
            id: Some(format!("p{:03}", i)),
            display_name: format!("Product {}", i),
            gender: GENDERS[i % GENDERS.len()].to_string(),
            base_colour: COLOURS[i % COLOURS.len()].to_string(),
            master_category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            similarity: 1.0 - (i as f64 * 0.04),
            image_url: format!("https://cdn.example.com/p{:03}.jpg", i),
        })
        .collect()
}
