use crate::config::toml_config::{SourceConfig, SourceType, TomlConfig};
use crate::config::{request_with_defaults, SearchSettings, DEFAULT_VIEW_PATH};
use crate::core::render::OutputFormat;
use crate::domain::criteria::{parse_label, parse_selector};
use crate::utils::error::{ListingError, Result};
use chrono::NaiveTime;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cityhub")]
#[command(about = "Browse and filter local restaurants, salons and events")]
pub struct CliConfig {
    /// View path with optional query string, e.g. "/search?q=sushi&sort=rating"
    #[arg(long)]
    pub path: Option<String>,

    /// Free-text query matched against names, descriptions and labels
    #[arg(short, long)]
    pub query: Option<String>,

    /// restaurant, event, salon, service or all
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Cuisine, salon service or event category (exact match)
    #[arg(long)]
    pub label: Option<String>,

    /// Rating bucket such as 4+ or 4.5+
    #[arg(long)]
    pub min_rating: Option<String>,

    /// Free, $, $$, $$$, $$$$ or all
    #[arg(long)]
    pub price: Option<String>,

    #[arg(long, help = "Only show listings open at --at (default: now)")]
    pub open_now: bool,

    #[arg(long, help = "Order results by rating, highest first")]
    pub sort_by_rating: bool,

    #[arg(long, help = "Record a near-me location hint")]
    pub near_me: bool,

    /// Local time for --open-now, as HH:MM
    #[arg(long)]
    pub at: Option<String>,

    /// JSON or TOML listings file
    #[arg(long, conflicts_with = "endpoint")]
    pub data: Option<String>,

    /// HTTP endpoint returning a JSON array of listings
    #[arg(long)]
    pub endpoint: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// table, json or csv
    #[arg(long)]
    pub format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Merges flags over the TOML file (if any). Flags win over the view path,
    /// which wins over `[defaults]`.
    pub fn resolve(&self, file: Option<TomlConfig>) -> Result<SearchSettings> {
        let file = file.unwrap_or_default();
        let defaults = file.defaults();

        let source = match (&self.data, &self.endpoint) {
            (Some(_), Some(_)) => {
                return Err(ListingError::ConfigError {
                    message: "--data and --endpoint cannot be used together".to_string(),
                })
            }
            (Some(path), None) => SourceConfig {
                path: Some(path.clone()),
                r#type: SourceType::File,
                ..file.source.clone()
            },
            (None, Some(endpoint)) => SourceConfig {
                endpoint: Some(endpoint.clone()),
                r#type: SourceType::Http,
                ..file.source.clone()
            },
            (None, None) => file.source.clone(),
        };

        let path = self
            .path
            .clone()
            .or_else(|| defaults.path.clone())
            .unwrap_or_else(|| DEFAULT_VIEW_PATH.to_string());
        let mut request = request_with_defaults(&path, &defaults)?;

        let criteria = &mut request.criteria;
        if let Some(query) = &self.query {
            criteria.query = query.clone();
        }
        if let Some(kind) = &self.kind {
            match request.view.seeded_kind() {
                Some(seeded) => tracing::debug!(
                    "Ignoring --type {} on a {} view",
                    kind,
                    seeded
                ),
                None => criteria.kind = parse_selector(kind)?,
            }
        }
        if let Some(label) = &self.label {
            criteria.label = parse_label(label);
        }
        if let Some(rating) = &self.min_rating {
            criteria.min_rating = parse_selector(rating)?;
        }
        if let Some(price) = &self.price {
            criteria.price = parse_selector(price)?;
        }

        request.hints.open_now |= self.open_now;
        request.hints.sort_by_rating |= self.sort_by_rating;
        request.hints.near_me |= self.near_me;

        let at = match &self.at {
            Some(text) => parse_clock(text)?,
            None => chrono::Local::now().time(),
        };

        let format = match &self.format {
            Some(text) => text.parse()?,
            None => file.output_format().unwrap_or(OutputFormat::Table),
        };

        Ok(SearchSettings {
            source,
            request,
            at,
            format,
        })
    }
}

fn parse_clock(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").map_err(|e| {
        ListingError::InvalidConfigValueError {
            field: "at".to_string(),
            value: text.to_string(),
            reason: format!("expected HH:MM ({})", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::View;
    use crate::domain::model::{ListingType, PriceTier};

    #[test]
    fn test_parse_args() {
        let cli = CliConfig::try_parse_from([
            "cityhub",
            "--path",
            "/search?q=neon",
            "--type",
            "restaurant",
            "--min-rating",
            "4.5+",
            "--at",
            "13:30",
            "--format",
            "csv",
        ])
        .unwrap();

        let settings = cli.resolve(None).unwrap();
        assert_eq!(settings.request.view, View::Search);
        assert_eq!(settings.request.criteria.query, "neon");
        assert_eq!(settings.request.criteria.kind, Some(ListingType::Restaurant));
        assert_eq!(settings.at, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.source.r#type, SourceType::Fixture);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[source]
type = "http"
endpoint = "https://api.example.com/listings"
retry_attempts = 5

[defaults]
path = "/salons"
price = "$$$"

[output]
format = "json"
"#,
        )
        .unwrap();

        let cli = CliConfig {
            data: Some("listings.json".to_string()),
            price: Some("$$".to_string()),
            ..CliConfig::default()
        };
        let settings = cli.resolve(Some(file)).unwrap();

        assert_eq!(settings.source.r#type, SourceType::File);
        assert_eq!(settings.source.retry_attempts, Some(5));
        assert_eq!(settings.request.view, View::Salons);
        assert_eq!(settings.request.criteria.price, Some(PriceTier::Moderate));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_data_and_endpoint_conflict() {
        assert!(CliConfig::try_parse_from([
            "cityhub",
            "--data",
            "a.json",
            "--endpoint",
            "http://x"
        ])
        .is_err());
    }

    #[test]
    fn test_bad_clock() {
        let cli = CliConfig {
            at: Some("noon".to_string()),
            ..CliConfig::default()
        };
        assert!(cli.resolve(None).is_err());
    }
}
