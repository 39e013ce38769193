use serde::{Deserialize, Serialize};

use crate::application::services::{NarrationRequest, ValidationError};

/// JSON body accepted by the POST endpoints. Coordinates may be sent as
/// numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct NarrationBody {
    pub latitude: Option<DegreesInput>,
    pub longitude: Option<DegreesInput>,
    pub place_name: Option<String>,
    pub language: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DegreesInput {
    Number(f64),
    Text(String),
}

/// Query string accepted by the GET endpoints.
#[derive(Debug, Deserialize)]
pub struct NarrationQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub place_name: Option<String>,
    pub language: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationResponse {
    pub transcript: String,
    pub audio: String,
    pub audio_format: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl TryFrom<NarrationBody> for NarrationRequest {
    type Error = ValidationError;

    fn try_from(body: NarrationBody) -> Result<Self, Self::Error> {
        let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
            return Err(ValidationError::MissingCoordinates);
        };

        match (latitude, longitude) {
            (DegreesInput::Number(lat), DegreesInput::Number(lng)) => NarrationRequest::new(
                lat,
                lng,
                body.place_name,
                body.language,
                body.user_id,
            ),
            (lat, lng) => NarrationRequest::parse(
                Some(&lat.into_text()),
                Some(&lng.into_text()),
                body.place_name,
                body.language,
                body.user_id,
            ),
        }
    }
}

impl TryFrom<NarrationQuery> for NarrationRequest {
    type Error = ValidationError;

    fn try_from(query: NarrationQuery) -> Result<Self, Self::Error> {
        NarrationRequest::parse(
            query.latitude.as_deref().filter(|v| !v.trim().is_empty()),
            query.longitude.as_deref().filter(|v| !v.trim().is_empty()),
            query.place_name,
            query.language,
            query.user_id,
        )
    }
}

impl DegreesInput {
    fn into_text(self) -> String {
        match self {
            DegreesInput::Number(n) => n.to_string(),
            DegreesInput::Text(s) => s,
        }
    }
}
