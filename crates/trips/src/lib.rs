//! Trip planning: nearest-attraction ranking, suggestion assembly, and
//! priced trip deals.

pub mod planner;
pub mod ranker;

pub use planner::TripPlanner;
pub use ranker::{rank_nearby_attractions, rank_with_distances, RankedAttraction};
