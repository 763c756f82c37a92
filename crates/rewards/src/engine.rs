//! Concurrent reward matching: evaluates a user's visit history against the
//! attraction catalog and awards each attraction at most once.
//!
//! One task per visited location runs under a semaphore-bounded `JoinSet`;
//! the only shared mutable state is the user's reward set, guarded by the
//! per-user mutex inside [`User::try_insert_reward`]. There is no cross-user
//! coordination.

use crate::proximity::ProximityEvaluator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use trailpoint_core::config::RewardsConfig;
use trailpoint_core::providers::{AttractionCatalog, RewardPointsOracle};
use trailpoint_core::types::{Attraction, UserReward, VisitedLocation};
use trailpoint_core::user::User;
use trailpoint_core::{TrailPointError, TrailPointResult};
use uuid::Uuid;

/// One attraction whose oracle lookup failed during a matching pass.
#[derive(Debug, Clone)]
pub struct FailedMatch {
    pub attraction_id: Uuid,
    pub attraction_name: String,
    pub error: String,
}

/// Result of one matching pass over a user's history. Oracle failures are
/// reported per attraction; rewards inserted before a failure are retained.
#[derive(Debug, Clone, Default)]
pub struct RewardOutcome {
    pub pairs_evaluated: usize,
    pub rewards_inserted: usize,
    pub failed_attractions: Vec<FailedMatch>,
}

#[derive(Default)]
struct TaskOutcome {
    pairs: usize,
    inserted: usize,
    failures: Vec<FailedMatch>,
}

pub struct RewardsEngine {
    catalog: Arc<dyn AttractionCatalog>,
    oracle: Arc<dyn RewardPointsOracle>,
    proximity: Arc<ProximityEvaluator>,
    matcher_permits: Arc<Semaphore>,
    shutdown: Arc<AtomicBool>,
}

impl RewardsEngine {
    pub fn new(
        catalog: Arc<dyn AttractionCatalog>,
        oracle: Arc<dyn RewardPointsOracle>,
        proximity: Arc<ProximityEvaluator>,
        config: &RewardsConfig,
    ) -> Self {
        info!(
            proximity_buffer = config.proximity_buffer_miles,
            attraction_range = config.attraction_proximity_range_miles,
            matchers = config.max_concurrent_matchers,
            "Rewards engine initialized"
        );
        Self {
            catalog,
            oracle,
            proximity,
            matcher_permits: Arc::new(Semaphore::new(config.max_concurrent_matchers.max(1))),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn proximity(&self) -> &ProximityEvaluator {
        &self.proximity
    }

    /// Stop issuing oracle calls. In-flight passes finish their current pair
    /// and drain; already-inserted rewards are never rolled back.
    pub fn shutdown(&self) {
        info!("Rewards engine shutdown requested");
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Evaluate every visited-location/attraction pair for the user and
    /// insert at most one reward per attraction.
    ///
    /// Completes only after every pair has been evaluated. Coordinate
    /// validation failures abort the pass; oracle failures are collected
    /// into the outcome instead (partial success).
    pub async fn calculate_rewards(&self, user: &Arc<User>) -> TrailPointResult<RewardOutcome> {
        let attractions = Arc::new(self.catalog.list_attractions());
        let visited = user.visited_locations();
        // Per-user override wins over the process-wide buffer; either way the
        // value is fixed for the whole pass.
        let buffer = user
            .preferences()
            .proximity_buffer
            .unwrap_or_else(|| self.proximity.proximity_buffer());

        let mut tasks: JoinSet<TrailPointResult<TaskOutcome>> = JoinSet::new();
        for visited_location in visited {
            let attractions = Arc::clone(&attractions);
            let user = Arc::clone(user);
            let oracle = Arc::clone(&self.oracle);
            let proximity = Arc::clone(&self.proximity);
            let permits = Arc::clone(&self.matcher_permits);
            let shutdown = Arc::clone(&self.shutdown);

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| TrailPointError::Internal(anyhow::anyhow!(e)))?;
                match_visit(
                    &user,
                    &visited_location,
                    &attractions,
                    buffer,
                    &proximity,
                    oracle.as_ref(),
                    &shutdown,
                )
            });
        }

        let mut outcome = RewardOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            let task = joined.map_err(|e| TrailPointError::Internal(anyhow::anyhow!(e)))??;
            outcome.pairs_evaluated += task.pairs;
            outcome.rewards_inserted += task.inserted;
            outcome.failed_attractions.extend(task.failures);
        }

        debug!(
            user = %user.user_name,
            pairs = outcome.pairs_evaluated,
            inserted = outcome.rewards_inserted,
            failed = outcome.failed_attractions.len(),
            "Reward matching pass complete"
        );
        Ok(outcome)
    }
}

/// Match one visited location against the whole catalog. Runs inside a
/// spawned task; the oracle call happens outside any lock.
fn match_visit(
    user: &Arc<User>,
    visited_location: &VisitedLocation,
    attractions: &[Attraction],
    buffer: f64,
    proximity: &ProximityEvaluator,
    oracle: &dyn RewardPointsOracle,
    shutdown: &AtomicBool,
) -> TrailPointResult<TaskOutcome> {
    let mut outcome = TaskOutcome::default();
    for attraction in attractions {
        if shutdown.load(Ordering::Relaxed) {
            debug!(user = %user.user_name, "Matching cancelled, skipping remaining pairs");
            break;
        }
        outcome.pairs += 1;

        if !proximity.near_attraction_with_buffer(visited_location, attraction, buffer)? {
            continue;
        }
        if user.has_reward_for(attraction.attraction_id) {
            continue;
        }

        match oracle.attraction_reward_points(attraction.attraction_id, user.user_id) {
            Ok(reward_points) => {
                let reward = UserReward {
                    visited_location: visited_location.clone(),
                    attraction: attraction.clone(),
                    reward_points,
                };
                if user.try_insert_reward(reward) {
                    outcome.inserted += 1;
                    metrics::counter!("rewards.inserted").increment(1);
                    debug!(
                        user = %user.user_name,
                        attraction = %attraction.attraction_name,
                        points = reward_points,
                        "Reward earned"
                    );
                } else {
                    // Another visit in the same pass claimed this attraction
                    // between our pre-check and the insert. The oracle call
                    // is wasted; the reward is not doubled.
                    metrics::counter!("rewards.duplicate_races").increment(1);
                }
            }
            Err(e) => {
                warn!(
                    user = %user.user_name,
                    attraction = %attraction.attraction_name,
                    error = %e,
                    "Oracle lookup failed"
                );
                metrics::counter!("rewards.oracle_failures").increment(1);
                outcome.failures.push(FailedMatch {
                    attraction_id: attraction.attraction_id,
                    attraction_name: attraction.attraction_name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}
