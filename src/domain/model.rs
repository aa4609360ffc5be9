use crate::utils::error::{ListingError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variant tag of a listing, used by the type filter and the view routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Restaurant,
    Event,
    Salon,
    Service,
}

impl ListingType {
    pub const ALL: [ListingType; 4] = [
        ListingType::Restaurant,
        ListingType::Event,
        ListingType::Salon,
        ListingType::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Restaurant => "restaurant",
            ListingType::Event => "event",
            ListingType::Salon => "salon",
            ListingType::Service => "service",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        ListingType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| ListingError::invalid_criteria("type", s))
    }
}

/// Price tier. Tiers compare by equality only when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "Free", alias = "free")]
    Free,
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Premium,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 5] = [
        PriceTier::Free,
        PriceTier::Budget,
        PriceTier::Moderate,
        PriceTier::Premium,
        PriceTier::Luxury,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTier::Free => "Free",
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Premium => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PriceTier::Free => "Free",
            PriceTier::Budget => "Budget",
            PriceTier::Moderate => "Moderate",
            PriceTier::Premium => "Premium",
            PriceTier::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PriceTier {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        PriceTier::ALL
            .into_iter()
            .find(|tier| {
                tier.symbol() == trimmed || tier.description().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ListingError::invalid_criteria("price", s))
    }
}

/// Minimum rating bucket such as `4+` or `4.5+`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RatingFloor(f64);

impl RatingFloor {
    pub fn new(value: f64) -> Result<Self> {
        validate_range("min_rating", value, 0.0, 5.0)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for RatingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.0)
    }
}

impl FromStr for RatingFloor {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        let number = s.trim().trim_end_matches('+').trim();
        let value: f64 = number
            .parse()
            .map_err(|_| ListingError::invalid_criteria("min_rating", s))?;
        RatingFloor::new(value).map_err(|_| ListingError::invalid_criteria("min_rating", s))
    }
}

impl TryFrom<String> for RatingFloor {
    type Error = ListingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RatingFloor> for String {
    fn from(value: RatingFloor) -> Self {
        value.to_string()
    }
}

/// Variant-specific classification labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListingKind {
    Restaurant {
        cuisine: String,
    },
    Salon {
        services: Vec<String>,
        #[serde(default)]
        specialties: Vec<String>,
    },
    Event {
        category: String,
    },
    Service {
        category: String,
    },
}

impl ListingKind {
    pub fn listing_type(&self) -> ListingType {
        match self {
            ListingKind::Restaurant { .. } => ListingType::Restaurant,
            ListingKind::Salon { .. } => ListingType::Salon,
            ListingKind::Event { .. } => ListingType::Event,
            ListingKind::Service { .. } => ListingType::Service,
        }
    }

    /// Labels that take part in text search and the label filter.
    /// Salon specialties are display-only.
    pub fn labels(&self) -> &[String] {
        match self {
            ListingKind::Restaurant { cuisine } => std::slice::from_ref(cuisine),
            ListingKind::Salon { services, .. } => services,
            ListingKind::Event { category } | ListingKind::Service { category } => {
                std::slice::from_ref(category)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ListingKind,
    pub rating: f64,
    #[serde(alias = "priceRange")]
    pub price: PriceTier,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub open_hours: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

impl Listing {
    pub fn listing_type(&self) -> ListingType {
        self.kind.listing_type()
    }

    pub fn labels(&self) -> &[String] {
        self.kind.labels()
    }
}

impl Validate for Listing {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("listing.id", &self.id)?;
        validate_non_empty_string("listing.name", &self.name)?;
        validate_range("listing.rating", self.rating, 0.0, 5.0)
    }
}
