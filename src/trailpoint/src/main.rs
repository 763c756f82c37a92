//! TrailPoint — location-based rewards and trip suggestion service.
//!
//! Entry point: wires the simulated external providers, seeds test users,
//! and runs the background location tracker until shutdown.

mod providers;

use clap::Parser;
use providers::{SimAttractionCatalog, SimLocationProvider, SimRewardOracle, SimTripPricer};
use std::sync::Arc;
use tracing::{info, warn};
use trailpoint_core::config::AppConfig;
use trailpoint_core::providers::{
    AttractionCatalog, LocationProvider, RewardPointsOracle, TripPricingProvider,
};
use trailpoint_rewards::{ProximityEvaluator, RewardsEngine};
use trailpoint_tracker::{seed, LocationTracker, UserRegistry};
use trailpoint_trips::TripPlanner;

#[derive(Parser, Debug)]
#[command(name = "trailpoint")]
#[command(about = "Location-based rewards and trip suggestion service")]
#[command(version)]
struct Cli {
    /// Number of seeded internal users (overrides config)
    #[arg(long, env = "TRAILPOINT__TRACKER__INTERNAL_USER_COUNT")]
    users: Option<usize>,

    /// Polling interval in seconds (overrides config)
    #[arg(long, env = "TRAILPOINT__TRACKER__POLLING_INTERVAL_SECS")]
    interval: Option<u64>,

    /// Reward proximity buffer in miles (overrides config)
    #[arg(long, env = "TRAILPOINT__REWARDS__PROXIMITY_BUFFER_MILES")]
    proximity_buffer: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trailpoint=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("TrailPoint starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(users) = cli.users {
        config.tracker.internal_user_count = users;
    }
    if let Some(interval) = cli.interval {
        config.tracker.polling_interval_secs = interval;
    }
    if let Some(buffer) = cli.proximity_buffer {
        config.rewards.proximity_buffer_miles = buffer;
    }

    info!(
        users = config.tracker.internal_user_count,
        interval_secs = config.tracker.polling_interval_secs,
        proximity_buffer = config.rewards.proximity_buffer_miles,
        "Configuration loaded"
    );

    // External collaborators, simulated for standalone runs.
    let catalog: Arc<dyn AttractionCatalog> =
        Arc::new(SimAttractionCatalog::with_default_catalog());
    let oracle: Arc<dyn RewardPointsOracle> = Arc::new(SimRewardOracle);
    let locations: Arc<dyn LocationProvider> = Arc::new(SimLocationProvider);
    let pricing: Arc<dyn TripPricingProvider> = Arc::new(SimTripPricer);

    let proximity = Arc::new(ProximityEvaluator::from_config(&config.rewards));
    let rewards = Arc::new(RewardsEngine::new(
        Arc::clone(&catalog),
        Arc::clone(&oracle),
        proximity,
        &config.rewards,
    ));
    let planner = TripPlanner::new(
        Arc::clone(&catalog),
        Arc::clone(&oracle),
        pricing,
        &config.trips,
    );

    let registry = Arc::new(UserRegistry::new());
    if config.tracker.test_mode {
        seed::seed_internal_users(&registry, config.tracker.internal_user_count);
    }

    let tracker = Arc::new(LocationTracker::new(
        Arc::clone(&registry),
        locations,
        Arc::clone(&rewards),
        &config.tracker,
    ));
    let handle = tracker.spawn();

    // Sample suggestion for one seeded user, as a smoke signal in the logs.
    if let Some(user) = registry.all_users().into_iter().next() {
        match planner.build_suggestion(&user) {
            Ok(suggestion) => info!(
                user = %user.user_name,
                suggestions = suggestion.suggestions.len(),
                "Sample suggestion built"
            ),
            Err(e) => warn!(user = %user.user_name, error = %e, "Sample suggestion failed"),
        }
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    rewards.shutdown();
    handle.stop_tracking().await;

    info!("TrailPoint stopped");
    Ok(())
}
