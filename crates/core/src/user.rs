//! User domain state, shared across concurrent matching tasks.

use crate::types::{TripDeal, UserReward, VisitedLocation};
use parking_lot::{Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use uuid::Uuid;

/// Trip-planning preferences, adjustable per user.
#[derive(Debug, Clone)]
pub struct UserPreferences {
    /// Per-user override of the process-wide reward proximity buffer, in
    /// miles. `None` means the configured default applies.
    pub proximity_buffer: Option<f64>,
    pub trip_duration: u32,
    pub ticket_quantity: u32,
    pub number_of_adults: u32,
    pub number_of_children: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            proximity_buffer: None,
            trip_duration: 1,
            ticket_quantity: 1,
            number_of_adults: 1,
            number_of_children: 0,
        }
    }
}

/// A registered user: immutable identity plus interior-mutable visit history
/// and reward state, safe to share across matching tasks behind an `Arc`.
///
/// The reward set is keyed by attraction id under a single mutex, so the
/// "already rewarded?" check and the insert are one atomic step.
pub struct User {
    pub user_id: Uuid,
    pub user_name: String,
    pub phone_number: String,
    pub email_address: String,
    visited_locations: RwLock<Vec<VisitedLocation>>,
    rewards: Mutex<HashMap<Uuid, UserReward>>,
    preferences: RwLock<UserPreferences>,
    trip_deals: RwLock<Vec<TripDeal>>,
}

impl User {
    pub fn new(
        user_id: Uuid,
        user_name: impl Into<String>,
        phone_number: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            phone_number: phone_number.into(),
            email_address: email_address.into(),
            visited_locations: RwLock::new(Vec::new()),
            rewards: Mutex::new(HashMap::new()),
            preferences: RwLock::new(UserPreferences::default()),
            trip_deals: RwLock::new(Vec::new()),
        }
    }

    /// Append a visit. The history is append-only.
    pub fn add_visited_location(&self, visited: VisitedLocation) {
        self.visited_locations.write().push(visited);
    }

    /// Snapshot of the visit history, oldest first.
    pub fn visited_locations(&self) -> Vec<VisitedLocation> {
        self.visited_locations.read().clone()
    }

    /// The most recent visit, if any position was ever recorded.
    pub fn last_visited_location(&self) -> Option<VisitedLocation> {
        self.visited_locations.read().last().cloned()
    }

    pub fn visit_count(&self) -> usize {
        self.visited_locations.read().len()
    }

    /// Fast pre-check used to skip oracle calls for attractions the user
    /// already holds a reward for. Advisory only — the authoritative check
    /// happens inside [`User::try_insert_reward`].
    pub fn has_reward_for(&self, attraction_id: Uuid) -> bool {
        self.rewards.lock().contains_key(&attraction_id)
    }

    /// Atomic check-and-insert: the reward is stored only if no reward for
    /// the same attraction exists yet. Returns whether it was inserted.
    pub fn try_insert_reward(&self, reward: UserReward) -> bool {
        let mut rewards = self.rewards.lock();
        match rewards.entry(reward.attraction.attraction_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(reward);
                true
            }
        }
    }

    /// Snapshot of the earned rewards. Set order is not significant.
    pub fn rewards(&self) -> Vec<UserReward> {
        self.rewards.lock().values().cloned().collect()
    }

    pub fn reward_count(&self) -> usize {
        self.rewards.lock().len()
    }

    /// Cumulative points over every earned reward.
    pub fn total_reward_points(&self) -> u32 {
        self.rewards.lock().values().map(|r| r.reward_points).sum()
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences.read().clone()
    }

    pub fn set_preferences(&self, preferences: UserPreferences) {
        *self.preferences.write() = preferences;
    }

    pub fn trip_deals(&self) -> Vec<TripDeal> {
        self.trip_deals.read().clone()
    }

    pub fn set_trip_deals(&self, deals: Vec<TripDeal>) {
        *self.trip_deals.write() = deals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location;
    use crate::types::Attraction;
    use chrono::Utc;

    fn sample_reward(user: &User, attraction_id: Uuid, points: u32) -> UserReward {
        let visited = VisitedLocation {
            user_id: user.user_id,
            location: Location {
                latitude: 48.858482,
                longitude: 2.294426,
            },
            time_visited: Utc::now(),
        };
        UserReward {
            visited_location: visited,
            attraction: Attraction {
                attraction_id,
                attraction_name: "Tour Eiffel".to_string(),
                city: "Paris".to_string(),
                state: "France".to_string(),
                location: Location {
                    latitude: 48.858482,
                    longitude: 2.294426,
                },
            },
            reward_points: points,
        }
    }

    #[test]
    fn test_reward_insert_is_unique_per_attraction() {
        let user = User::new(Uuid::new_v4(), "jon", "000", "jon@trailpoint.com");
        let attraction_id = Uuid::new_v4();

        assert!(user.try_insert_reward(sample_reward(&user, attraction_id, 100)));
        assert!(!user.try_insert_reward(sample_reward(&user, attraction_id, 999)));

        assert_eq!(user.reward_count(), 1);
        // The first insert wins; the losing insert never overwrites.
        assert_eq!(user.total_reward_points(), 100);
    }

    #[test]
    fn test_rewards_for_distinct_attractions_accumulate() {
        let user = User::new(Uuid::new_v4(), "jon", "000", "jon@trailpoint.com");
        user.try_insert_reward(sample_reward(&user, Uuid::new_v4(), 100));
        user.try_insert_reward(sample_reward(&user, Uuid::new_v4(), 250));
        assert_eq!(user.reward_count(), 2);
        assert_eq!(user.total_reward_points(), 350);
    }

    #[test]
    fn test_history_preserves_append_order() {
        let user = User::new(Uuid::new_v4(), "jon", "000", "jon@trailpoint.com");
        assert!(user.last_visited_location().is_none());

        for longitude in [1.0, 2.0, 3.0] {
            user.add_visited_location(VisitedLocation {
                user_id: user.user_id,
                location: Location {
                    latitude: 45.0,
                    longitude,
                },
                time_visited: Utc::now(),
            });
        }

        assert_eq!(user.visit_count(), 3);
        let last = user.last_visited_location().unwrap();
        assert_eq!(last.location.longitude, 3.0);
    }
}
