//! Stable, conjunctive listing filter.
//!
//! Every active constraint must hold for a listing to be kept. Output order is
//! input order; nothing is ranked or deduplicated.

use crate::domain::criteria::FilterCriteria;
use crate::domain::model::Listing;

/// Returns the listings that satisfy every active constraint in `criteria`.
pub fn filter(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    filter_refs(listings, criteria).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter`].
pub fn filter_refs<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    // 只轉一次小寫
    let needle = criteria.normalized_query();
    listings
        .iter()
        .filter(|listing| matches_prepared(listing, criteria, needle.as_deref()))
        .collect()
}

pub fn matches(listing: &Listing, criteria: &FilterCriteria) -> bool {
    matches_prepared(listing, criteria, criteria.normalized_query().as_deref())
}

fn matches_prepared(listing: &Listing, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    matches_text(listing, needle)
        && matches_kind(listing, criteria)
        && matches_label(listing, criteria)
        && matches_rating(listing, criteria)
        && matches_price(listing, criteria)
}

/// `needle` must already be lowercased.
fn matches_text(listing: &Listing, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&listing.name)
        || contains(&listing.description)
        || listing.labels().iter().any(|label| contains(label))
}

fn matches_kind(listing: &Listing, criteria: &FilterCriteria) -> bool {
    criteria
        .kind
        .map_or(true, |kind| listing.listing_type() == kind)
}

fn matches_label(listing: &Listing, criteria: &FilterCriteria) -> bool {
    match &criteria.label {
        Some(label) => listing.labels().iter().any(|l| l == label),
        None => true,
    }
}

fn matches_rating(listing: &Listing, criteria: &FilterCriteria) -> bool {
    criteria
        .min_rating
        .map_or(true, |floor| listing.rating >= floor.value())
}

fn matches_price(listing: &Listing, criteria: &FilterCriteria) -> bool {
    criteria.price.map_or(true, |price| listing.price == price)
}
