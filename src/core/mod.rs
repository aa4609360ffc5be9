pub mod filter;
pub mod hours;
pub mod render;
pub mod search;
pub mod view;

pub use crate::domain::criteria::FilterCriteria;
pub use crate::domain::model::{Listing, ListingKind, ListingType, PriceTier, RatingFloor};
pub use crate::domain::ports::ListingProvider;
pub use crate::utils::error::Result;
