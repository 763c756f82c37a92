use crate::geo::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named point of interest from the external attraction catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub attraction_id: Uuid,
    pub attraction_name: String,
    pub city: String,
    pub state: String,
    pub location: Location,
}

/// A timestamped coordinate recorded for a user. History entries are
/// appended and never mutated; the last entry is the most recent position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitedLocation {
    pub user_id: Uuid,
    pub location: Location,
    pub time_visited: DateTime<Utc>,
}

/// A one-time point award linking a user, an attraction, and the visit that
/// triggered it. At most one per (user, attraction) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReward {
    pub visited_location: VisitedLocation,
    pub attraction: Attraction,
    pub reward_points: u32,
}

/// One ranked entry of a suggestion. The rank is carried explicitly —
/// attraction display names are not unique, so ordering never rides on a
/// name-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyAttraction {
    /// 1-based position in the shortlist, closest first.
    pub rank: usize,
    pub attraction: Attraction,
    pub distance_miles: f64,
    /// Projected points, queried fresh from the oracle. Independent of
    /// whether the user has already earned a reward for this attraction.
    pub reward_points: u32,
}

/// Ranked, non-persistent view of the nearest attractions to a reference
/// location. Recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionsSuggestion {
    pub user_location: Location,
    pub suggestions: Vec<NearbyAttraction>,
}

/// A priced trip offer from the external pricing provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDeal {
    pub name: String,
    pub trip_id: Uuid,
    pub price: f64,
}
