//! Synthetic users for test mode and load testing. External users come from
//! a database; seeded users live only in the registry.

use crate::registry::UserRegistry;
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::info;
use trailpoint_core::geo::Location;
use trailpoint_core::types::VisitedLocation;
use trailpoint_core::user::User;
use uuid::Uuid;

/// Latitude bound matching the Web Mercator projection limit.
const LATITUDE_RANGE: f64 = 85.051_128_78;

const VISITS_PER_USER: usize = 3;

/// Generate `count` internal users, each with a short randomized visit
/// history, and register them.
pub fn seed_internal_users(registry: &UserRegistry, count: usize) {
    let mut rng = rand::thread_rng();
    for i in 0..count {
        let user_name = format!("internalUser{i}");
        let email_address = format!("{user_name}@trailpoint.com");
        let user = Arc::new(User::new(Uuid::new_v4(), user_name, "000", email_address));
        generate_location_history(&user, &mut rng);
        registry.add_user(user);
    }
    info!(count, "Seeded internal users");
}

fn generate_location_history<R: Rng>(user: &User, rng: &mut R) {
    for _ in 0..VISITS_PER_USER {
        let location = Location {
            latitude: rng.gen_range(-LATITUDE_RANGE..=LATITUDE_RANGE),
            longitude: rng.gen_range(-180.0..=180.0),
        };
        let time_visited = Utc::now() - Duration::days(rng.gen_range(0..30));
        user.add_visited_location(VisitedLocation {
            user_id: user.user_id,
            location,
            time_visited,
        });
    }
}
