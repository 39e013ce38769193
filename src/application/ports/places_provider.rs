use async_trait::async_trait;

use crate::domain::{Coordinate, Place};

/// Places-lookup oracle. Results come back unordered and the radius filter
/// applied by the provider is only approximate.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlacesProviderError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("provider rejected request: {0}")]
    Rejected(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
