pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{FileListings, HttpListings, RetryPolicy, StaticListings};
pub use crate::config::{toml_config::TomlConfig, SearchSettings};
pub use crate::core::{
    filter::filter,
    search::{ListingFinder, SearchSession},
    view::{View, ViewRequest, ViewResult},
};
pub use crate::domain::{
    criteria::FilterCriteria,
    model::{Listing, ListingKind, ListingType, PriceTier, RatingFloor},
    ports::ListingProvider,
};
pub use crate::utils::error::{ListingError, Result};
