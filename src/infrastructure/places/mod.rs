mod google_places_client;
mod mock_places_provider;

pub use google_places_client::{DEFAULT_PLACES_BASE_URL, GooglePlacesClient};
pub use mock_places_provider::MockPlacesProvider;
