//! High-volume reward matching: every user must end up with exactly one
//! reward when all of their visits coincide with a single attraction.

use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinSet;
use trailpoint_core::config::RewardsConfig;
use trailpoint_core::geo::Location;
use trailpoint_core::providers::{AttractionCatalog, RewardPointsOracle};
use trailpoint_core::types::{Attraction, VisitedLocation};
use trailpoint_core::user::User;
use trailpoint_core::TrailPointResult;
use trailpoint_rewards::{ProximityEvaluator, RewardsEngine};
use trailpoint_tracker::UserRegistry;
use uuid::Uuid;

const USER_COUNT: usize = 10_000;
const VISITS_PER_USER: usize = 3;

struct FixedCatalog(Vec<Attraction>);

impl AttractionCatalog for FixedCatalog {
    fn list_attractions(&self) -> Vec<Attraction> {
        self.0.clone()
    }
}

struct FixedOracle;

impl RewardPointsOracle for FixedOracle {
    fn attraction_reward_points(
        &self,
        _attraction_id: Uuid,
        _user_id: Uuid,
    ) -> TrailPointResult<u32> {
        Ok(100)
    }
}

fn attraction(name: &str, latitude: f64, longitude: f64) -> Attraction {
    Attraction {
        attraction_id: Uuid::new_v4(),
        attraction_name: name.to_string(),
        city: "Paris".to_string(),
        state: "France".to_string(),
        location: Location {
            latitude,
            longitude,
        },
    }
}

fn french_catalog() -> Vec<Attraction> {
    vec![
        attraction("Tour Eiffel", 48.858482, 2.294426),
        attraction("Futuroscope", 46.669752, 0.368955),
        attraction("Notre Dame", 48.853208, 2.348640),
        attraction("Musée Automobile", 46.441387, 0.475771),
        attraction("Clos Lucé", 47.410445, 0.991830),
        attraction("Eglise Saint-Jean-Baptiste", 47.410445, 0.991830),
        attraction("La Rhune", 43.309685, -1.635410),
        attraction("Grand place", 50.292564, 2.781040),
    ]
}

#[tokio::test(flavor = "multi_thread")]
async fn test_high_volume_rewards_exactly_once_per_user() {
    let catalog = french_catalog();
    // Every visit coincides with La Rhune; the other seven attractions are
    // well outside the 10-mile buffer around it, so exactly one reward can
    // match per user.
    let target = catalog[6].clone();

    let config = RewardsConfig::default();
    let engine = Arc::new(RewardsEngine::new(
        Arc::new(FixedCatalog(catalog)),
        Arc::new(FixedOracle),
        Arc::new(ProximityEvaluator::from_config(&config)),
        &config,
    ));

    let registry = Arc::new(UserRegistry::new());
    for i in 0..USER_COUNT {
        let user = Arc::new(User::new(
            Uuid::new_v4(),
            format!("internalUser{i}"),
            "000",
            format!("internalUser{i}@trailpoint.com"),
        ));
        for _ in 0..VISITS_PER_USER {
            user.add_visited_location(VisitedLocation {
                user_id: user.user_id,
                location: target.location,
                time_visited: Utc::now(),
            });
        }
        registry.add_user(user);
    }

    let target_id = target.attraction_id;
    let mut passes: JoinSet<TrailPointResult<usize>> = JoinSet::new();
    for user in registry.all_users() {
        let engine = Arc::clone(&engine);
        passes.spawn(async move {
            let outcome = engine.calculate_rewards(&user).await?;
            assert_eq!(user.reward_count(), 1);
            assert_eq!(user.rewards()[0].attraction.attraction_id, target_id);
            Ok(outcome.rewards_inserted)
        });
    }

    let mut total_inserted = 0;
    while let Some(joined) = passes.join_next().await {
        total_inserted += joined.unwrap().unwrap();
    }

    assert_eq!(total_inserted, USER_COUNT);
    for user in registry.all_users() {
        assert_eq!(user.reward_count(), 1);
    }
}
