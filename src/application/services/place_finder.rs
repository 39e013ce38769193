use std::sync::Arc;

use crate::application::ports::PlacesProvider;
use crate::domain::{Coordinate, Place, RankedPlace, geo_math};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub start_radius_m: u32,
    pub max_radius_m: u32,
    pub radius_step_m: u32,
    /// Hard distance limit applied after the provider's own radius filter.
    pub cutoff_m: f64,
    pub max_results: usize,
    pub category: String,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            start_radius_m: 20,
            max_radius_m: 100,
            radius_step_m: 20,
            cutoff_m: 50.0,
            max_results: 3,
            category: "point_of_interest".to_string(),
        }
    }
}

pub struct PlaceFinder {
    provider: Arc<dyn PlacesProvider>,
    policy: SearchPolicy,
}

impl PlaceFinder {
    pub fn new(provider: Arc<dyn PlacesProvider>, policy: SearchPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Widens the search radius step by step until some candidate survives the
    /// hard cutoff. Provider failures count as an empty step; exhausting every
    /// radius yields an empty list rather than an error.
    pub async fn find_nearby(&self, center: Coordinate) -> Vec<RankedPlace> {
        let step = self.policy.radius_step_m.max(1);
        let mut radius = self.policy.start_radius_m;

        while radius <= self.policy.max_radius_m {
            match self
                .provider
                .search_nearby(center, radius, &self.policy.category)
                .await
            {
                Ok(candidates) => {
                    let found = candidates.len();
                    let ranked = rank_candidates(
                        center,
                        candidates,
                        self.policy.cutoff_m,
                        self.policy.max_results,
                    );
                    if !ranked.is_empty() {
                        tracing::debug!(
                            radius_m = radius,
                            candidates = found,
                            kept = ranked.len(),
                            "Nearby places resolved"
                        );
                        return ranked;
                    }
                    tracing::debug!(
                        radius_m = radius,
                        candidates = found,
                        "No places within cutoff, widening search"
                    );
                }
                Err(e) => {
                    tracing::warn!(radius_m = radius, error = %e, "Places lookup failed, widening search");
                }
            }

            radius = match radius.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }

        tracing::info!(%center, "No nearby places found");
        Vec::new()
    }
}

/// Drops candidates farther than `cutoff_m` from `center`, sorts the rest by
/// distance and keeps the closest `limit`.
pub fn rank_candidates(
    center: Coordinate,
    candidates: Vec<Place>,
    cutoff_m: f64,
    limit: usize,
) -> Vec<RankedPlace> {
    let mut ranked: Vec<RankedPlace> = candidates
        .into_iter()
        .map(|place| RankedPlace {
            distance_m: geo_math::distance_m(center, place.location),
            place,
        })
        .filter(|r| r.distance_m <= cutoff_m)
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked.truncate(limit);
    ranked
}
