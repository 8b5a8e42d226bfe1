use crate::error::ChatError;
use crate::models::ListingRecord;
use async_trait::async_trait;

/// Common trait for anything that can produce the current listings snapshot.
/// The datastore reader is the production implementation; tests plug in
/// in-memory sources.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch every listing that is available and published, in query order
    async fn fetch_available_listings(&self) -> Result<Vec<ListingRecord>, ChatError>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
