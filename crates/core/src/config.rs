use serde::Deserialize;

/// Root application configuration. Loaded from environment variables with
/// the prefix `TRAILPOINT__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub trips: TripsConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    /// Reward-eligibility radius in miles: a visit inside this buffer earns
    /// the attraction's reward.
    #[serde(default = "default_proximity_buffer_miles")]
    pub proximity_buffer_miles: f64,
    /// Radius in miles inside which an attraction counts as nearby at all.
    #[serde(default = "default_attraction_proximity_range_miles")]
    pub attraction_proximity_range_miles: f64,
    /// Upper bound on concurrently running matching tasks per pass.
    #[serde(default = "default_max_concurrent_matchers")]
    pub max_concurrent_matchers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripsConfig {
    /// Size of the nearest-attraction shortlist.
    #[serde(default = "default_nearby_attraction_count")]
    pub nearby_attraction_count: usize,
    #[serde(default = "default_trip_pricer_api_key")]
    pub trip_pricer_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_polling_interval_secs")]
    pub polling_interval_secs: u64,
    /// Number of seeded internal users when test mode is on.
    #[serde(default = "default_internal_user_count")]
    pub internal_user_count: usize,
    #[serde(default = "default_test_mode")]
    pub test_mode: bool,
}

// Default functions
fn default_proximity_buffer_miles() -> f64 {
    10.0
}
fn default_attraction_proximity_range_miles() -> f64 {
    200.0
}
fn default_max_concurrent_matchers() -> usize {
    16
}
fn default_nearby_attraction_count() -> usize {
    5
}
fn default_trip_pricer_api_key() -> String {
    "test-server-api-key".to_string()
}
fn default_polling_interval_secs() -> u64 {
    300
}
fn default_internal_user_count() -> usize {
    100
}
fn default_test_mode() -> bool {
    true
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            proximity_buffer_miles: default_proximity_buffer_miles(),
            attraction_proximity_range_miles: default_attraction_proximity_range_miles(),
            max_concurrent_matchers: default_max_concurrent_matchers(),
        }
    }
}

impl Default for TripsConfig {
    fn default() -> Self {
        Self {
            nearby_attraction_count: default_nearby_attraction_count(),
            trip_pricer_api_key: default_trip_pricer_api_key(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            polling_interval_secs: default_polling_interval_secs(),
            internal_user_count: default_internal_user_count(),
            test_mode: default_test_mode(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rewards: RewardsConfig::default(),
            trips: TripsConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("TRAILPOINT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
