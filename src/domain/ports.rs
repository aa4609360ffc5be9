use crate::domain::model::Listing;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of listing records. The whole collection is returned on every call;
/// callers replace their snapshot wholesale.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Listing>>;

    /// Short name used in log lines.
    fn source_name(&self) -> &str;
}

#[async_trait]
impl<P: ListingProvider + ?Sized> ListingProvider for Box<P> {
    async fn list_all(&self) -> Result<Vec<Listing>> {
        (**self).list_all().await
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}
