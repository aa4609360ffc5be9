use crate::domain::model::{ListingType, PriceTier, RatingFloor};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The value every selector uses for "no constraint".
pub const ANY: &str = "all";

/// User-selected constraints. Every field is independent; unset means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: Option<ListingType>,
    /// Cuisine, salon service or event category.
    pub label: Option<String>,
    pub min_rating: Option<RatingFloor>,
    pub price: Option<PriceTier>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds criteria from the textual selector values, where `all` or an empty
    /// string leaves the constraint unset.
    pub fn from_selectors(query: &str, kind: &str, min_rating: &str, price: &str) -> Result<Self> {
        Ok(Self {
            query: query.to_string(),
            kind: parse_selector(kind)?,
            label: None,
            min_rating: parse_selector(min_rating)?,
            price: parse_selector(price)?,
        })
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_kind(mut self, kind: ListingType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_min_rating(mut self, floor: RatingFloor) -> Self {
        self.min_rating = Some(floor);
        self
    }

    pub fn with_price(mut self, price: PriceTier) -> Self {
        self.price = Some(price);
        self
    }

    /// Lowercased, trimmed query; `None` when the text constraint is inactive.
    pub fn normalized_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.normalized_query().is_none()
            && self.kind.is_none()
            && self.label.is_none()
            && self.min_rating.is_none()
            && self.price.is_none()
    }
}

/// Parses a selector value, mapping `all` (any case) and empty input to `None`.
pub fn parse_selector<T>(raw: &str) -> Result<Option<T>>
where
    T: FromStr<Err = crate::utils::error::ListingError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ANY) {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Like [`parse_selector`] for free-form labels, which need no parsing.
pub fn parse_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ANY) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
