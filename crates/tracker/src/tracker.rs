//! Background location tracker: polls each registered user's position on an
//! interval and feeds new visits into the rewards engine.

use crate::registry::UserRegistry;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use trailpoint_core::config::TrackerConfig;
use trailpoint_core::providers::LocationProvider;
use trailpoint_core::types::VisitedLocation;
use trailpoint_core::user::User;
use trailpoint_core::TrailPointResult;
use trailpoint_rewards::RewardsEngine;

pub struct LocationTracker {
    registry: Arc<UserRegistry>,
    locations: Arc<dyn LocationProvider>,
    rewards: Arc<RewardsEngine>,
    polling_interval: Duration,
}

impl LocationTracker {
    pub fn new(
        registry: Arc<UserRegistry>,
        locations: Arc<dyn LocationProvider>,
        rewards: Arc<RewardsEngine>,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            registry,
            locations,
            rewards,
            polling_interval: Duration::from_secs(config.polling_interval_secs),
        }
    }

    /// Poll the user's current position, append it to the history, and run a
    /// reward matching pass over the updated history.
    pub async fn track_user_location(
        &self,
        user: &Arc<User>,
    ) -> TrailPointResult<VisitedLocation> {
        let location = self.locations.user_location(user.user_id)?;
        let visited = VisitedLocation {
            user_id: user.user_id,
            location,
            time_visited: Utc::now(),
        };
        user.add_visited_location(visited.clone());

        let outcome = self.rewards.calculate_rewards(user).await?;
        if !outcome.failed_attractions.is_empty() {
            warn!(
                user = %user.user_name,
                failed = outcome.failed_attractions.len(),
                "Reward lookups failed during tracking"
            );
        }
        Ok(visited)
    }

    /// Latest known position, tracking on demand when the history is empty.
    pub async fn get_user_location(&self, user: &Arc<User>) -> TrailPointResult<VisitedLocation> {
        match user.last_visited_location() {
            Some(visited) => Ok(visited),
            None => self.track_user_location(user).await,
        }
    }

    async fn track_all_users(&self) {
        let users = self.registry.all_users();
        debug!(users = users.len(), "Tracking cycle started");
        for user in users {
            if let Err(e) = self.track_user_location(&user).await {
                warn!(user = %user.user_name, error = %e, "Tracking failed");
            }
        }
    }

    /// Spawn the polling loop. The loop runs a tracking cycle immediately,
    /// then every polling interval, until the handle signals shutdown.
    pub fn spawn(self: Arc<Self>) -> TrackerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let tracker = Arc::clone(&self);

        let task = tokio::spawn(async move {
            info!(
                interval_secs = tracker.polling_interval.as_secs(),
                "Location tracker started"
            );
            let mut ticker = tokio::time::interval(tracker.polling_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => tracker.track_all_users().await,
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("Location tracker stopping");
                            break;
                        }
                    }
                }
            }
        });

        TrackerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running tracker loop.
pub struct TrackerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Signal the loop and wait for it to finish its current cycle.
    pub async fn stop_tracking(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Tracker task join failed");
        }
    }
}
