//! Ranked candidates returned by the search service.

use serde::{Deserialize, Serialize};

/// One candidate from the similarity search, immutable after receipt.
///
/// Facet fields keep the service's raw strings so values outside the known
/// facet sets survive decoding; they simply never match a facet filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireResultItem")]
pub struct ResultItem {
    pub id: Option<String>,
    pub display_name: String,
    pub gender: String,
    pub base_colour: String,
    pub master_category: String,
    /// Service-assigned score in [0, 1].
    pub similarity: f64,
    pub image_url: String,
}

impl ResultItem {
    /// Similarity rounded to a whole percentage, clamped to 0..=100.
    pub fn similarity_percent(&self) -> u8 {
        let pct = (self.similarity * 100.0).round();
        if pct.is_nan() || pct <= 0.0 {
            0
        } else if pct >= 100.0 {
            100
        } else {
            pct as u8
        }
    }

    pub fn match_tier(&self) -> MatchTier {
        MatchTier::from_percent(self.similarity_percent())
    }
}

/// Result record as the service sends it.
///
/// Mongo-backed services send `_id`, sometimes as `{"$oid": ...}`. The name
/// is `productDisplayName` in the catalogue export and `name` elsewhere.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResultItem {
    #[serde(rename = "_id", default)]
    underscore_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    product_display_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    base_colour: Option<String>,
    #[serde(default)]
    master_category: Option<String>,
    #[serde(default)]
    similarity: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
}

fn id_from_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Object(mut map) => map.remove("$oid").and_then(id_from_value),
        _ => None,
    }
}

impl From<WireResultItem> for ResultItem {
    fn from(wire: WireResultItem) -> Self {
        Self {
            id: wire.underscore_id.or(wire.id).and_then(id_from_value),
            display_name: wire
                .product_display_name
                .or(wire.display_name)
                .or(wire.name)
                .unwrap_or_default(),
            gender: wire.gender.unwrap_or_default(),
            base_colour: wire.base_colour.unwrap_or_default(),
            master_category: wire.master_category.unwrap_or_default(),
            similarity: wire.similarity.unwrap_or(0.0),
            image_url: wire.image_url.unwrap_or_default(),
        }
    }
}

/// Qualitative label for a similarity percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Basic,
}

impl MatchTier {
    pub fn from_percent(pct: u8) -> Self {
        match pct {
            80.. => MatchTier::Excellent,
            60..=79 => MatchTier::Good,
            40..=59 => MatchTier::Fair,
            _ => MatchTier::Basic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent Match",
            MatchTier::Good => "Good Match",
            MatchTier::Fair => "Fair Match",
            MatchTier::Basic => "Basic Match",
        }
    }
}
