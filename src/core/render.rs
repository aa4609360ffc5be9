use crate::core::view::ViewResult;
use crate::domain::model::Listing;
use crate::utils::error::{ListingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ListingError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, json, csv".to_string(),
            }),
        }
    }
}

pub fn render(result: &ViewResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_cards(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => render_csv(&result.listings),
    }
}

fn render_cards(result: &ViewResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", result.view.title());

    if let Some(message) = result.empty_message() {
        let _ = writeln!(out, "{}", message);
        return out;
    }

    let _ = writeln!(out, "{} results found", result.listings.len());
    for listing in &result.listings {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "[{}] {}  ★ {}  {}",
            listing.listing_type(),
            listing.name,
            listing.rating,
            listing.price
        );
        if !listing.description.is_empty() {
            let _ = writeln!(out, "    {}", listing.description);
        }
        let _ = writeln!(out, "    {}", listing.labels().join(", "));
        for detail in [&listing.address, &listing.open_hours, &listing.phone] {
            if !detail.is_empty() {
                let _ = writeln!(out, "    {}", detail);
            }
        }
    }
    out
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    labels: String,
    rating: f64,
    price: &'a str,
    address: &'a str,
    phone: &'a str,
    open_hours: &'a str,
}

fn render_csv(listings: &[Listing]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for listing in listings {
        writer.serialize(CsvRow {
            id: &listing.id,
            name: &listing.name,
            kind: listing.listing_type().as_str(),
            labels: listing.labels().join("; "),
            rating: listing.rating,
            price: listing.price.symbol(),
            address: &listing.address,
            phone: &listing.phone,
            open_hours: &listing.open_hours,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ListingError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ListingError::MalformedDataError {
        source_name: "csv output".to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixture::sample_listings;
    use crate::core::view::ViewRequest;
    use chrono::NaiveTime;

    fn result_for(target: &str) -> ViewResult {
        let now = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        ViewRequest::parse(target).unwrap().present(&sample_listings(), now)
    }

    #[test]
    fn test_cards_show_empty_state() {
        let out = render(&result_for("/restaurants?price=$$$$"), OutputFormat::Table).unwrap();
        assert!(out.contains("== Restaurants =="));
        assert!(out.contains("No restaurants found matching your criteria."));
    }

    #[test]
    fn test_cards_list_results() {
        let out = render(&result_for("/search?q=cyber"), OutputFormat::Table).unwrap();
        // 描述中的 cyberpunk 也算命中
        assert!(out.contains("4 results found"));
        assert!(out.contains("Cyber Burger"));
        assert!(out.contains("Neon Bistro"));
    }

    #[test]
    fn test_csv_header_and_rows() {
        let out = render(&result_for("/salons"), OutputFormat::Csv).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,type,labels,rating,price,address,phone,open_hours")
        );
        assert_eq!(lines.count(), 3);
        assert!(out.contains("Hair; Beard; Styling"));
    }

    #[test]
    fn test_json_output() {
        let out = render(&result_for("/events"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["view"], "events");
        assert_eq!(value["listings"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
