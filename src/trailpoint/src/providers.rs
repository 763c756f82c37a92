//! Simulated external collaborators for standalone and test-mode runs.
//! Production deployments swap these for real GPS, reward-central, and
//! pricing integrations.

use rand::Rng;
use trailpoint_core::geo::Location;
use trailpoint_core::providers::{
    AttractionCatalog, LocationProvider, RewardPointsOracle, TripPricingProvider,
};
use trailpoint_core::types::{Attraction, TripDeal};
use trailpoint_core::TrailPointResult;
use uuid::Uuid;

/// Latitude bound matching the Web Mercator projection limit.
const LATITUDE_RANGE: f64 = 85.051_128_78;

/// In-memory attraction catalog.
pub struct SimAttractionCatalog {
    attractions: Vec<Attraction>,
}

impl SimAttractionCatalog {
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self { attractions }
    }

    /// A small fixed catalog of French attractions.
    pub fn with_default_catalog() -> Self {
        let entry = |name: &str, city: &str, latitude: f64, longitude: f64| Attraction {
            attraction_id: Uuid::new_v4(),
            attraction_name: name.to_string(),
            city: city.to_string(),
            state: "France".to_string(),
            location: Location {
                latitude,
                longitude,
            },
        };
        Self::new(vec![
            entry("Tour Eiffel", "Paris", 48.858482, 2.294426),
            entry("Futuroscope", "Chasseneuil-du-Poitou", 46.669752, 0.368955),
            entry("Notre Dame", "Paris", 48.853208, 2.348640),
            entry("Musée Automobile", "Vernon", 46.441387, 0.475771),
            entry("Clos Lucé", "Amboise", 47.410445, 0.991830),
            entry("Eglise Saint-Jean-Baptiste", "Saint-Jean-de-Luz", 43.386897, -1.661074),
            entry("La Rhune", "Ascain", 43.309685, -1.635410),
            entry("Grand place", "Arras", 50.292564, 2.781040),
        ])
    }
}

impl AttractionCatalog for SimAttractionCatalog {
    fn list_attractions(&self) -> Vec<Attraction> {
        self.attractions.clone()
    }
}

/// Oracle returning a random point value per lookup, like the real reward
/// central: opaque and keyed by (attraction, user).
pub struct SimRewardOracle;

impl RewardPointsOracle for SimRewardOracle {
    fn attraction_reward_points(
        &self,
        _attraction_id: Uuid,
        _user_id: Uuid,
    ) -> TrailPointResult<u32> {
        Ok(rand::thread_rng().gen_range(1..=1000))
    }
}

/// GPS feed producing a random valid position per poll.
pub struct SimLocationProvider;

impl LocationProvider for SimLocationProvider {
    fn user_location(&self, _user_id: Uuid) -> TrailPointResult<Location> {
        let mut rng = rand::thread_rng();
        Location::new(
            rng.gen_range(-LATITUDE_RANGE..=LATITUDE_RANGE),
            rng.gen_range(-180.0..=180.0),
        )
    }
}

/// Pricing service emitting a handful of randomly priced deals, discounted
/// by the user's cumulative reward points.
pub struct SimTripPricer;

const PROVIDER_NAMES: [&str; 5] = [
    "Holiday Travels",
    "Enterprize Ventures Limited",
    "Sunny Days",
    "FlyAway Trips",
    "United Partners Vacations",
];

impl TripPricingProvider for SimTripPricer {
    fn price_trips(
        &self,
        _api_key: &str,
        _user_id: Uuid,
        number_of_adults: u32,
        number_of_children: u32,
        trip_duration: u32,
        cumulative_reward_points: u32,
    ) -> TrailPointResult<Vec<TripDeal>> {
        let mut rng = rand::thread_rng();
        let deals = PROVIDER_NAMES
            .iter()
            .map(|name| {
                let nightly: f64 = rng.gen_range(50.0..200.0);
                let gross = nightly
                    * f64::from(trip_duration)
                    * (f64::from(number_of_adults) + 0.5 * f64::from(number_of_children));
                let price = (gross - f64::from(cumulative_reward_points) / 10.0).max(1.0);
                TripDeal {
                    name: (*name).to_string(),
                    trip_id: Uuid::new_v4(),
                    price,
                }
            })
            .collect();
        Ok(deals)
    }
}
