use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{PlacesProvider, PlacesProviderError};
use crate::domain::{Coordinate, Place};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Google Places "Nearby Search" adapter.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Deserialize)]
struct NearbyResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GooglePlacesClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesProviderError> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let location = format!("{},{}", center.lat(), center.lng());
        let radius = radius_m.to_string();

        tracing::debug!(radius_m = radius_m, category = %category, "Querying nearby places");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PlacesProviderError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesProviderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: NearbySearchResponse = response
            .json()
            .await
            .map_err(|e| PlacesProviderError::InvalidResponse(e.to_string()))?;

        match body.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(other) => {
                return Err(PlacesProviderError::Rejected(format!(
                    "{}: {}",
                    other,
                    body.error_message.unwrap_or_default()
                )));
            }
        }

        let places = body
            .results
            .into_iter()
            .filter_map(|result| {
                let name = result.name?;
                let location = result.geometry?.location;
                let coordinate = Coordinate::new(location.lat, location.lng).ok()?;
                Some(Place::new(name, result.types, coordinate))
            })
            .collect();

        Ok(places)
    }
}
