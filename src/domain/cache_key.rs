use std::fmt;

use sha2::{Digest, Sha256};

use super::Coordinate;

/// Hex SHA-256 digest identifying one narration artifact pair.
///
/// The coordinate is rounded before hashing, so nearby requests that collapse
/// to the same rounded point share a key. Discriminators (place name,
/// language, revisit index, ...) separate narrations of the same spot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(coordinate: Coordinate, precision: u32, discriminators: &[&str]) -> Self {
        let (lat, lng) = coordinate.rounded(precision);

        let mut material = format!("{}:{}:{}", precision, lat, lng);
        // Length prefix keeps ["a|b"] and ["a", "b"] apart.
        for discriminator in discriminators {
            material.push_str(&format!("|{}:{}", discriminator.len(), discriminator));
        }

        let mut hasher = Sha256::new();
        hasher.update(material.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
