//! Decoding of external listing records.
//!
//! A malformed record is skipped with a warning; it never aborts the rest of
//! the set. Only a document whose overall shape is wrong is an error.

use crate::domain::model::Listing;
use crate::utils::error::{ListingError, Result};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::collections::HashSet;

/// Accepts either a bare JSON array or an object with a `listings` array.
pub fn decode_json(document: serde_json::Value, source_name: &str) -> Result<Vec<Listing>> {
    let items = match document {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("listings") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(malformed(source_name, "expected a 'listings' array")),
        },
        _ => return Err(malformed(source_name, "expected an array of listings")),
    };

    Ok(keep_valid(items, source_name))
}

#[derive(Deserialize)]
struct TomlDocument {
    listings: Option<Vec<serde_json::Value>>,
}

/// Expects one `[[listings]]` table per record.
pub fn decode_toml(content: &str, source_name: &str) -> Result<Vec<Listing>> {
    let document: TomlDocument = toml::from_str(content)?;
    let items = document
        .listings
        .ok_or_else(|| malformed(source_name, "expected [[listings]] tables"))?;

    Ok(keep_valid(items, source_name))
}

fn keep_valid(items: Vec<serde_json::Value>, source_name: &str) -> Vec<Listing> {
    let total = items.len();
    let mut seen = HashSet::new();
    let mut listings = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let decoded = serde_json::from_value::<Listing>(item).map_err(ListingError::from);
        let listing = match decoded.and_then(|l| l.validate().map(|_| l)) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("⚠️ Skipping record #{} from {}: {}", index, source_name, e);
                continue;
            }
        };

        if !seen.insert(listing.id.clone()) {
            tracing::warn!(
                "⚠️ Skipping record #{} from {}: duplicate id '{}'",
                index,
                source_name,
                listing.id
            );
            continue;
        }

        listings.push(listing);
    }

    if listings.len() < total {
        tracing::warn!(
            "Loaded {} of {} records from {}",
            listings.len(),
            total,
            source_name
        );
    } else {
        tracing::debug!("Loaded {} records from {}", total, source_name);
    }

    listings
}

fn malformed(source_name: &str, message: &str) -> ListingError {
    ListingError::MalformedDataError {
        source_name: source_name.to_string(),
        message: message.to_string(),
    }
}
