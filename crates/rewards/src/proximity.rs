//! Distance-threshold classification for attraction/location pairs.

use parking_lot::RwLock;
use trailpoint_core::config::RewardsConfig;
use trailpoint_core::geo::{self, Location};
use trailpoint_core::types::{Attraction, VisitedLocation};
use trailpoint_core::TrailPointResult;
use tracing::debug;

/// Applies the two proximity thresholds, both in statute miles.
///
/// `attraction_proximity_range` decides whether an attraction counts as
/// nearby at all; `proximity_buffer` decides reward eligibility. The buffer
/// is mutable at runtime — matching passes snapshot it once up front so a
/// concurrent change cannot split a pass in two.
pub struct ProximityEvaluator {
    attraction_proximity_range: f64,
    default_proximity_buffer: f64,
    proximity_buffer: RwLock<f64>,
}

impl ProximityEvaluator {
    pub fn new(attraction_proximity_range: f64, proximity_buffer: f64) -> Self {
        Self {
            attraction_proximity_range,
            default_proximity_buffer: proximity_buffer,
            proximity_buffer: RwLock::new(proximity_buffer),
        }
    }

    pub fn from_config(config: &RewardsConfig) -> Self {
        Self::new(
            config.attraction_proximity_range_miles,
            config.proximity_buffer_miles,
        )
    }

    /// Current reward-eligibility radius in miles.
    pub fn proximity_buffer(&self) -> f64 {
        *self.proximity_buffer.read()
    }

    pub fn attraction_proximity_range(&self) -> f64 {
        self.attraction_proximity_range
    }

    pub fn set_proximity_buffer(&self, miles: f64) {
        debug!(miles, "Proximity buffer updated");
        *self.proximity_buffer.write() = miles;
    }

    /// Restore the configured default buffer.
    pub fn reset_proximity_buffer(&self) {
        *self.proximity_buffer.write() = self.default_proximity_buffer;
    }

    /// True when the location sits inside the attraction proximity range.
    pub fn is_within_attraction_proximity(
        &self,
        attraction: &Attraction,
        location: &Location,
    ) -> TrailPointResult<bool> {
        Ok(geo::distance(&attraction.location, location)? <= self.attraction_proximity_range)
    }

    /// True when the visit sits inside the current reward buffer.
    pub fn near_attraction(
        &self,
        visited: &VisitedLocation,
        attraction: &Attraction,
    ) -> TrailPointResult<bool> {
        self.near_attraction_with_buffer(visited, attraction, self.proximity_buffer())
    }

    /// Same check against an explicit buffer, for callers that snapshot the
    /// buffer once per matching pass.
    pub fn near_attraction_with_buffer(
        &self,
        visited: &VisitedLocation,
        attraction: &Attraction,
        buffer: f64,
    ) -> TrailPointResult<bool> {
        Ok(geo::distance(&attraction.location, &visited.location)? <= buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trailpoint_core::geo::STATUTE_MILES_PER_NAUTICAL_MILE;
    use uuid::Uuid;

    // Degrees of latitude along a meridian for a given distance in miles.
    fn degrees_for_miles(miles: f64) -> f64 {
        miles / (60.0 * STATUTE_MILES_PER_NAUTICAL_MILE)
    }

    fn attraction_at(latitude: f64, longitude: f64) -> Attraction {
        Attraction {
            attraction_id: Uuid::new_v4(),
            attraction_name: "Tour Eiffel".to_string(),
            city: "Paris".to_string(),
            state: "France".to_string(),
            location: Location {
                latitude,
                longitude,
            },
        }
    }

    fn visit_at(latitude: f64, longitude: f64) -> VisitedLocation {
        VisitedLocation {
            user_id: Uuid::new_v4(),
            location: Location {
                latitude,
                longitude,
            },
            time_visited: Utc::now(),
        }
    }

    #[test]
    fn test_attraction_proximity_boundary() {
        let evaluator = ProximityEvaluator::new(200.0, 10.0);
        let attraction = attraction_at(0.0, 0.0);

        let at_range = Location {
            latitude: degrees_for_miles(200.0) - 1e-9,
            longitude: 0.0,
        };
        let beyond_range = Location {
            latitude: degrees_for_miles(200.1),
            longitude: 0.0,
        };

        assert!(evaluator
            .is_within_attraction_proximity(&attraction, &at_range)
            .unwrap());
        assert!(!evaluator
            .is_within_attraction_proximity(&attraction, &beyond_range)
            .unwrap());
    }

    #[test]
    fn test_coincident_visit_is_near() {
        let evaluator = ProximityEvaluator::new(200.0, 10.0);
        let attraction = attraction_at(48.858482, 2.294426);
        let visit = visit_at(48.858482, 2.294426);
        assert!(evaluator.near_attraction(&visit, &attraction).unwrap());
    }

    #[test]
    fn test_visit_beyond_buffer_is_not_near() {
        let evaluator = ProximityEvaluator::new(200.0, 10.0);
        let attraction = attraction_at(0.0, 0.0);
        let visit = visit_at(degrees_for_miles(10.1), 0.0);
        assert!(!evaluator.near_attraction(&visit, &attraction).unwrap());
    }

    #[test]
    fn test_set_and_reset_proximity_buffer() {
        let evaluator = ProximityEvaluator::new(200.0, 10.0);
        let attraction = attraction_at(0.0, 0.0);
        let visit = visit_at(degrees_for_miles(10.1), 0.0);

        evaluator.set_proximity_buffer(25.0);
        assert_eq!(evaluator.proximity_buffer(), 25.0);
        assert!(evaluator.near_attraction(&visit, &attraction).unwrap());

        evaluator.reset_proximity_buffer();
        assert_eq!(evaluator.proximity_buffer(), 10.0);
        assert!(!evaluator.near_attraction(&visit, &attraction).unwrap());
    }

    #[test]
    fn test_explicit_buffer_overrides_shared_state() {
        let evaluator = ProximityEvaluator::new(200.0, 10.0);
        let attraction = attraction_at(0.0, 0.0);
        let visit = visit_at(degrees_for_miles(50.0), 0.0);

        assert!(!evaluator.near_attraction(&visit, &attraction).unwrap());
        assert!(evaluator
            .near_attraction_with_buffer(&visit, &attraction, 60.0)
            .unwrap());
    }
}
