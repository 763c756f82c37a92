//! Great-circle distance between coordinates, in statute miles.

use crate::error::{TrailPointError, TrailPointResult};
use serde::{Deserialize, Serialize};

pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.15077945;

/// A point on the globe, in degrees. Plain value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Build a validated location.
    pub fn new(latitude: f64, longitude: f64) -> TrailPointResult<Self> {
        let location = Self {
            latitude,
            longitude,
        };
        location.validate()?;
        Ok(location)
    }

    /// Check that latitude is within [-90, 90] and longitude within
    /// [-180, 180].
    pub fn validate(&self) -> TrailPointResult<()> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(TrailPointError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// Great-circle distance via the spherical law of cosines.
///
/// The cosine argument is clamped to [-1, 1] before `acos` so coincident or
/// antipodal points cannot drift out of the domain through rounding.
pub fn distance(a: &Location, b: &Location) -> TrailPointResult<f64> {
    a.validate()?;
    b.validate()?;

    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    let angle = cosine.clamp(-1.0, 1.0).acos();

    let nautical_miles = 60.0 * angle.to_degrees();
    Ok(STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [loc(0.0, 0.0), loc(45.0, 1.0), loc(-33.9, 151.2)];
        for p in points {
            assert_eq!(distance(&p, &p).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = loc(48.858482, 2.294426);
        let b = loc(45.0, 1.0);
        assert_eq!(distance(&a, &b).unwrap(), distance(&b, &a).unwrap());
    }

    #[test]
    fn test_distance_to_tour_eiffel() {
        // Reference (45.0, 1.0) to the Tour Eiffel (48.858482, 2.294426).
        let reference = loc(45.0, 1.0);
        let eiffel = loc(48.858482, 2.294426);
        let miles = distance(&reference, &eiffel).unwrap();
        assert!((miles - 273.3).abs() < 0.5, "got {miles}");
    }

    #[test]
    fn test_antipodal_points_do_not_panic() {
        let a = loc(45.0, 90.0);
        let b = loc(-45.0, -90.0);
        let miles = distance(&a, &b).unwrap();
        // Half the Earth's circumference: 180 degrees of arc.
        let expected = 180.0 * 60.0 * STATUTE_MILES_PER_NAUTICAL_MILE;
        assert!((miles - expected).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        let bad = loc(90.1, 0.0);
        let good = loc(0.0, 0.0);
        assert!(matches!(
            distance(&bad, &good),
            Err(TrailPointError::InvalidCoordinate { .. })
        ));
        assert!(Location::new(-90.1, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude_rejected() {
        assert!(Location::new(0.0, 180.1).is_err());
        assert!(Location::new(0.0, -181.0).is_err());
        // Bounds themselves are valid.
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
    }
}
