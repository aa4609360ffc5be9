use crate::core::filter::filter;
use crate::core::hours;
use crate::domain::criteria::{parse_label, parse_selector, FilterCriteria};
use crate::domain::model::{Listing, ListingType};
use crate::utils::error::{ListingError, Result};
use chrono::NaiveTime;
use serde::Serialize;
use url::Url;

// 只用來解析相對路徑
const BASE_URL: &str = "http://cityhub.local/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Search,
    Restaurants,
    Salons,
    Events,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Search,
        View::Restaurants,
        View::Salons,
        View::Events,
    ];

    pub fn from_path(path: &str) -> Result<Self> {
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        View::ALL
            .into_iter()
            .find(|view| view.path() == normalized)
            .ok_or_else(|| ListingError::RoutingError {
                path: path.to_string(),
            })
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Search => "/search",
            View::Restaurants => "/restaurants",
            View::Salons => "/salons",
            View::Events => "/events",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Featured This Week",
            View::Search => "Search Everything",
            View::Restaurants => "Restaurants",
            View::Salons => "Salons & Spas",
            View::Events => "Events",
        }
    }

    /// Listing type a category view is locked to.
    pub fn seeded_kind(&self) -> Option<ListingType> {
        match self {
            View::Restaurants => Some(ListingType::Restaurant),
            View::Salons => Some(ListingType::Salon),
            View::Events => Some(ListingType::Event),
            View::Home | View::Search => None,
        }
    }

    pub fn empty_message(&self, query: &str) -> String {
        match self {
            View::Search if !query.trim().is_empty() => {
                format!("No results found for \"{}\"", query.trim())
            }
            View::Search => "Start searching to find amazing places and events".to_string(),
            View::Home => "Nothing featured this week".to_string(),
            View::Restaurants => "No restaurants found matching your criteria.".to_string(),
            View::Salons => "No salons found matching your criteria.".to_string(),
            View::Events => "No events found matching your criteria.".to_string(),
        }
    }
}

/// View parameters that are not filter criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewHints {
    /// Carried through to the caller; listings have no coordinates to rank by distance.
    pub near_me: bool,
    pub open_now: bool,
    pub sort_by_rating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    pub view: View,
    pub criteria: FilterCriteria,
    pub hints: ViewHints,
}

impl ViewRequest {
    pub fn new(view: View) -> Self {
        let criteria = FilterCriteria {
            kind: view.seeded_kind(),
            ..FilterCriteria::default()
        };
        Self {
            view,
            criteria,
            hints: ViewHints::default(),
        }
    }

    /// Parses a path with an optional query string, e.g.
    /// `/search?q=sushi&rating=4.5%2B&sort=rating`.
    pub fn parse(target: &str) -> Result<Self> {
        let base = Url::parse(BASE_URL).map_err(|e| ListingError::ConfigError {
            message: format!("invalid base url: {}", e),
        })?;
        let url = base.join(target).map_err(|_| ListingError::RoutingError {
            path: target.to_string(),
        })?;

        let mut request = ViewRequest::new(View::from_path(url.path())?);
        for (key, value) in url.query_pairs() {
            request.apply_param(&key, &value)?;
        }

        tracing::debug!(
            "Parsed view request {} -> {:?} {:?}",
            target,
            request.criteria,
            request.hints
        );
        Ok(request)
    }

    fn apply_param(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "q" | "query" => self.criteria.query = value.to_string(),
            "type" => {
                let kind = parse_selector(value)?;
                match self.view.seeded_kind() {
                    Some(seeded) if kind != Some(seeded) => {
                        tracing::debug!(
                            "Ignoring type={} on {} view",
                            value,
                            self.view.path()
                        );
                    }
                    _ => self.criteria.kind = kind,
                }
            }
            "label" | "cuisine" | "service" | "category" => {
                self.criteria.label = parse_label(value)
            }
            "rating" | "minRating" => self.criteria.min_rating = parse_selector(value)?,
            "price" => self.criteria.price = parse_selector(value)?,
            "location" => self.hints.near_me = value == "near-me",
            "filter" => self.hints.open_now = value == "open-now",
            "sort" => self.hints.sort_by_rating = value == "rating",
            other => tracing::debug!("Ignoring unknown view parameter '{}'", other),
        }
        Ok(())
    }

    /// Runs the filter and then the view hints over one snapshot of listings.
    /// `now` is the local time used by the open-now hint.
    pub fn present(&self, listings: &[Listing], now: NaiveTime) -> ViewResult {
        let mut results = match self.view {
            View::Home => listings.iter().filter(|l| l.featured).cloned().collect(),
            _ => filter(listings, &self.criteria),
        };

        if self.hints.open_now {
            results.retain(|listing| hours::is_open_at(&listing.open_hours, now));
        }

        if self.hints.sort_by_rating {
            // sort_by 是穩定排序，同分保留原順序
            results.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }

        ViewResult {
            view: self.view,
            query: self.criteria.query.clone(),
            hints: self.hints,
            total: listings.len(),
            listings: results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    pub view: View,
    pub query: String,
    pub hints: ViewHints,
    /// Size of the snapshot the results were drawn from.
    pub total: usize,
    pub listings: Vec<Listing>,
}

impl ViewResult {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn empty_message(&self) -> Option<String> {
        self.is_empty().then(|| self.view.empty_message(&self.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PriceTier;

    #[test]
    fn test_view_from_path() {
        assert_eq!(View::from_path("/").unwrap(), View::Home);
        assert_eq!(View::from_path("/salons/").unwrap(), View::Salons);
        assert!(matches!(
            View::from_path("/shopping"),
            Err(ListingError::RoutingError { .. })
        ));
    }

    #[test]
    fn test_parse_search_params() {
        let request =
            ViewRequest::parse("/search?q=neon%20sushi&type=restaurant&rating=4.5%2B&price=$$$")
                .unwrap();
        assert_eq!(request.view, View::Search);
        assert_eq!(request.criteria.query, "neon sushi");
        assert_eq!(request.criteria.kind, Some(ListingType::Restaurant));
        assert_eq!(request.criteria.min_rating.map(|f| f.value()), Some(4.5));
        assert_eq!(request.criteria.price, Some(PriceTier::Premium));
    }

    #[test]
    fn test_parse_hints() {
        let request = ViewRequest::parse("/search?location=near-me").unwrap();
        assert!(request.hints.near_me);
        let request = ViewRequest::parse("/search?filter=open-now").unwrap();
        assert!(request.hints.open_now);
        let request = ViewRequest::parse("/search?sort=rating&utm_source=x").unwrap();
        assert!(request.hints.sort_by_rating);
        assert!(request.criteria.is_unconstrained());
    }

    #[test]
    fn test_category_view_keeps_seeded_kind() {
        let request = ViewRequest::parse("/salons?type=restaurant&service=Hair").unwrap();
        assert_eq!(request.criteria.kind, Some(ListingType::Salon));
        assert_eq!(request.criteria.label.as_deref(), Some("Hair"));
    }

    #[test]
    fn test_bad_param_value_is_error() {
        assert!(ViewRequest::parse("/search?price=cheap").is_err());
        assert!(ViewRequest::parse("/search?rating=10%2B").is_err());
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(
            View::Search.empty_message("cyber"),
            "No results found for \"cyber\""
        );
        assert_eq!(
            View::Search.empty_message(""),
            "Start searching to find amazing places and events"
        );
        assert_eq!(
            View::Restaurants.empty_message("x"),
            "No restaurants found matching your criteria."
        );
    }
}
