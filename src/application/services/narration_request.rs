use crate::domain::{Coordinate, CoordinateError, UserId};

/// A validated narration request. Building one is the only gate in front of
/// the external oracles.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationRequest {
    pub coordinate: Coordinate,
    pub place_name: Option<String>,
    pub language: Option<String>,
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing latitude or longitude")]
    MissingCoordinates,
    #[error("Invalid latitude or longitude format")]
    InvalidNumber,
    #[error("Invalid coordinates: {0}")]
    OutOfRange(#[from] CoordinateError),
    #[error("place_name cannot be empty")]
    EmptyPlaceName,
}

impl NarrationRequest {
    pub fn new(
        latitude: f64,
        longitude: f64,
        place_name: Option<String>,
        language: Option<String>,
        user_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let coordinate = Coordinate::new(latitude, longitude)?;

        let place_name = match place_name {
            Some(name) if name.trim().is_empty() => return Err(ValidationError::EmptyPlaceName),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        let language = language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let user_id = user_id.as_deref().and_then(UserId::parse);

        Ok(Self {
            coordinate,
            place_name,
            language,
            user_id,
        })
    }

    /// Parses textual coordinates, as they arrive from query strings or
    /// string-typed JSON fields.
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
        place_name: Option<String>,
        language: Option<String>,
        user_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(ValidationError::MissingCoordinates);
        };

        let latitude = parse_degrees(latitude)?;
        let longitude = parse_degrees(longitude)?;

        Self::new(latitude, longitude, place_name, language, user_id)
    }

    pub fn is_historical(&self) -> bool {
        self.user_id.is_some()
    }
}

fn parse_degrees(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber)
}
