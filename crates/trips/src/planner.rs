//! Assembles trip suggestions and priced trip deals for a user.

use crate::ranker;
use std::sync::Arc;
use tracing::{debug, info};
use trailpoint_core::config::TripsConfig;
use trailpoint_core::providers::{AttractionCatalog, RewardPointsOracle, TripPricingProvider};
use trailpoint_core::types::{AttractionsSuggestion, NearbyAttraction, TripDeal};
use trailpoint_core::user::User;
use trailpoint_core::{TrailPointError, TrailPointResult};

pub struct TripPlanner {
    catalog: Arc<dyn AttractionCatalog>,
    oracle: Arc<dyn RewardPointsOracle>,
    pricing: Arc<dyn TripPricingProvider>,
    trip_pricer_api_key: String,
    nearby_attraction_count: usize,
}

impl TripPlanner {
    pub fn new(
        catalog: Arc<dyn AttractionCatalog>,
        oracle: Arc<dyn RewardPointsOracle>,
        pricing: Arc<dyn TripPricingProvider>,
        config: &TripsConfig,
    ) -> Self {
        Self {
            catalog,
            oracle,
            pricing,
            trip_pricer_api_key: config.trip_pricer_api_key.clone(),
            nearby_attraction_count: config.nearby_attraction_count,
        }
    }

    /// Ranked shortlist of the nearest attractions to the user's most recent
    /// position, with projected reward points per attraction.
    ///
    /// Points come fresh from the oracle — the suggestion previews potential
    /// points, not earned ones. Fails with
    /// [`TrailPointError::NoLocationHistory`] when the user has no recorded
    /// visit to anchor the ranking.
    pub fn build_suggestion(&self, user: &User) -> TrailPointResult<AttractionsSuggestion> {
        let reference = user
            .last_visited_location()
            .ok_or_else(|| TrailPointError::NoLocationHistory(user.user_name.clone()))?;

        let catalog = self.catalog.list_attractions();
        let ranked = ranker::rank_with_distances(
            &reference.location,
            &catalog,
            self.nearby_attraction_count,
        )?;

        let mut suggestions = Vec::with_capacity(ranked.len());
        for (index, entry) in ranked.into_iter().enumerate() {
            let reward_points = self
                .oracle
                .attraction_reward_points(entry.attraction.attraction_id, user.user_id)?;
            suggestions.push(NearbyAttraction {
                rank: index + 1,
                attraction: entry.attraction,
                distance_miles: entry.distance_miles,
                reward_points,
            });
        }

        metrics::counter!("trips.suggestions_built").increment(1);
        debug!(
            user = %user.user_name,
            count = suggestions.len(),
            "Suggestion built"
        );
        Ok(AttractionsSuggestion {
            user_location: reference.location,
            suggestions,
        })
    }

    /// Price trips against the user's preferences and cumulative earned
    /// reward points. The deals are stored on the user and returned.
    pub fn trip_deals(&self, user: &User) -> TrailPointResult<Vec<TripDeal>> {
        let preferences = user.preferences();
        let cumulative_points = user.total_reward_points();

        let deals = self.pricing.price_trips(
            &self.trip_pricer_api_key,
            user.user_id,
            preferences.number_of_adults,
            preferences.number_of_children,
            preferences.trip_duration,
            cumulative_points,
        )?;
        user.set_trip_deals(deals.clone());

        metrics::counter!("trips.deals_priced").increment(1);
        info!(
            user = %user.user_name,
            deals = deals.len(),
            points = cumulative_points,
            "Trip deals priced"
        );
        Ok(deals)
    }
}
