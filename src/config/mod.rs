#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::render::OutputFormat;
use crate::core::view::ViewRequest;
use crate::domain::criteria::{parse_label, parse_selector};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveTime;
use toml_config::{DefaultsConfig, SourceConfig};

pub const DEFAULT_VIEW_PATH: &str = "/search";

/// Fully resolved settings for one search run.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub source: SourceConfig,
    pub request: ViewRequest,
    /// Local time for the open-now hint.
    pub at: NaiveTime,
    pub format: OutputFormat,
}

impl Validate for SearchSettings {
    fn validate(&self) -> Result<()> {
        self.source.validate()
    }
}

/// Parses the view path and fills every criterion the path left unset from `defaults`.
pub fn request_with_defaults(path: &str, defaults: &DefaultsConfig) -> Result<ViewRequest> {
    let mut request = ViewRequest::parse(path)?;
    let criteria = &mut request.criteria;

    if criteria.query.is_empty() {
        if let Some(query) = &defaults.query {
            criteria.query = query.clone();
        }
    }
    if criteria.kind.is_none() {
        if let Some(kind) = &defaults.r#type {
            criteria.kind = parse_selector(kind)?;
        }
    }
    if criteria.label.is_none() {
        criteria.label = defaults.label.as_deref().and_then(parse_label);
    }
    if criteria.min_rating.is_none() {
        if let Some(rating) = &defaults.min_rating {
            criteria.min_rating = parse_selector(rating)?;
        }
    }
    if criteria.price.is_none() {
        if let Some(price) = &defaults.price {
            criteria.price = parse_selector(price)?;
        }
    }

    request.hints.open_now |= defaults.open_now.unwrap_or(false);
    request.hints.sort_by_rating |= defaults.sort_by_rating.unwrap_or(false);
    Ok(request)
}
