// Adapters layer: concrete listing providers (fixtures, files, http).

pub mod file;
pub mod fixture;
pub mod http;
pub mod records;

pub use file::FileListings;
pub use fixture::StaticListings;
pub use http::{HttpListings, RetryPolicy};
