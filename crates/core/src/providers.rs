//! Seams to the external collaborators. The core never reimplements these;
//! the binary wires in simulated versions, tests supply fixtures.

use crate::error::TrailPointResult;
use crate::geo::Location;
use crate::types::{Attraction, TripDeal};
use uuid::Uuid;

/// Source of the attraction catalog. Assumed stable for the duration of a
/// single matching or ranking pass.
pub trait AttractionCatalog: Send + Sync {
    fn list_attractions(&self) -> Vec<Attraction>;
}

/// Opaque scoring function keyed by attraction and user identity. May be
/// slow or fail; treated as untrusted I/O.
pub trait RewardPointsOracle: Send + Sync {
    fn attraction_reward_points(
        &self,
        attraction_id: Uuid,
        user_id: Uuid,
    ) -> TrailPointResult<u32>;
}

/// Feed of current user positions, polled by the location tracker.
pub trait LocationProvider: Send + Sync {
    fn user_location(&self, user_id: Uuid) -> TrailPointResult<Location>;
}

/// External trip pricing service.
pub trait TripPricingProvider: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn price_trips(
        &self,
        api_key: &str,
        user_id: Uuid,
        number_of_adults: u32,
        number_of_children: u32,
        trip_duration: u32,
        cumulative_reward_points: u32,
    ) -> TrailPointResult<Vec<TripDeal>>;
}
