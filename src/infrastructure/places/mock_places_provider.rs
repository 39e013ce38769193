use crate::application::ports::{PlacesProvider, PlacesProviderError};
use crate::domain::{Coordinate, Place};

/// Offline stand-in that never finds anything, so prompts take the
/// no-places path.
pub struct MockPlacesProvider;

#[async_trait::async_trait]
impl PlacesProvider for MockPlacesProvider {
    async fn search_nearby(
        &self,
        _center: Coordinate,
        _radius_m: u32,
        _category: &str,
    ) -> Result<Vec<Place>, PlacesProviderError> {
        Ok(Vec::new())
    }
}
