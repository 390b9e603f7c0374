//! Facet filter criteria.
//!
//! Every facet is optional. An unset facet (or a zero similarity threshold)
//! places no constraint on the results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Gender facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Men, Gender::Women, Gender::Unisex];

    /// Value as it appears in result records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }
}

/// Base colour facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseColour {
    Black,
    White,
    Blue,
    Red,
    Green,
    Grey,
    #[serde(rename = "Navy Blue")]
    NavyBlue,
    Orange,
    Purple,
}

impl BaseColour {
    pub const ALL: [BaseColour; 9] = [
        BaseColour::Black,
        BaseColour::White,
        BaseColour::Blue,
        BaseColour::Red,
        BaseColour::Green,
        BaseColour::Grey,
        BaseColour::NavyBlue,
        BaseColour::Orange,
        BaseColour::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseColour::Black => "Black",
            BaseColour::White => "White",
            BaseColour::Blue => "Blue",
            BaseColour::Red => "Red",
            BaseColour::Green => "Green",
            BaseColour::Grey => "Grey",
            BaseColour::NavyBlue => "Navy Blue",
            BaseColour::Orange => "Orange",
            BaseColour::Purple => "Purple",
        }
    }
}

/// Master category facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Apparel,
    Accessories,
    Footwear,
    #[serde(rename = "Sporting Goods")]
    SportingGoods,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Apparel,
        Category::Accessories,
        Category::Footwear,
        Category::SportingGoods,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Apparel => "Apparel",
            Category::Accessories => "Accessories",
            Category::Footwear => "Footwear",
            Category::SportingGoods => "Sporting Goods",
        }
    }
}

/// Case-insensitive lookup against the display names, ignoring inner spacing
/// so `navyblue` and `navy blue` both resolve.
fn parse_facet<T: Copy>(
    facet: &str,
    input: &str,
    all: &[T],
    name: impl Fn(&T) -> &'static str,
) -> SessionResult<T> {
    let wanted = squash(input);
    all.iter()
        .copied()
        .find(|candidate| squash(name(candidate)) == wanted)
        .ok_or_else(|| {
            let options: Vec<&str> = all.iter().map(&name).collect();
            SessionError::validation(format!(
                "unknown {} '{}' (expected one of: {})",
                facet,
                input.trim(),
                options.join(", ")
            ))
        })
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Gender {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("gender", s, &Gender::ALL, Gender::as_str)
    }
}

impl FromStr for BaseColour {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_facet("colour", s, &BaseColour::ALL, BaseColour::as_str)
    }
}

impl FromStr for Category {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The filter panel labels this option "Sports".
        if squash(s) == "sports" {
            return Ok(Category::SportingGoods);
        }
        parse_facet("category", s, &Category::ALL, Category::as_str)
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_via_as_str!(Gender, BaseColour, Category);

/// Four-facet filter specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub gender: Option<Gender>,
    pub base_colour: Option<BaseColour>,
    pub category: Option<Category>,
    /// Minimum similarity as a percentage, 0..=100. Zero means no threshold.
    pub similarity_pct: u8,
}

impl FilterCriteria {
    /// Highest accepted similarity percentage.
    pub const MAX_SIMILARITY_PCT: u8 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_base_colour(mut self, colour: BaseColour) -> Self {
        self.base_colour = Some(colour);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the similarity threshold, rejecting values above 100.
    pub fn with_similarity_pct(mut self, pct: u8) -> SessionResult<Self> {
        if pct > Self::MAX_SIMILARITY_PCT {
            return Err(SessionError::validation(format!(
                "similarity must be between 0 and 100, got {}",
                pct
            )));
        }
        self.similarity_pct = pct;
        Ok(self)
    }

    /// Similarity threshold on the service's [0, 1] scale.
    pub fn min_similarity(&self) -> f64 {
        f64::from(self.similarity_pct) / 100.0
    }

    /// True when no facet constrains the results.
    pub fn is_unconstrained(&self) -> bool {
        self.gender.is_none()
            && self.base_colour.is_none()
            && self.category.is_none()
            && self.similarity_pct == 0
    }

    /// JSON sent in the `filters` field of the search request.
    ///
    /// Uses the service's field names with `""` for unset facets. The service
    /// is not required to honour it; local filtering decides what is shown.
    pub fn to_wire_json(&self) -> String {
        serde_json::json!({
            "gender": self.gender.map(|g| g.as_str()).unwrap_or(""),
            "baseColour": self.base_colour.map(|c| c.as_str()).unwrap_or(""),
            "category": self.category.map(|c| c.as_str()).unwrap_or(""),
            "similarity": self.similarity_pct,
        })
        .to_string()
    }
}
