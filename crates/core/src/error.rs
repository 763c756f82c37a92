use thiserror::Error;
use uuid::Uuid;

pub type TrailPointResult<T> = Result<T, TrailPointError>;

#[derive(Error, Debug)]
pub enum TrailPointError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("No location history recorded for user {0}")]
    NoLocationHistory(String),

    #[error("Reward points oracle error: {0}")]
    Oracle(String),

    #[error("Trip pricing error: {0}")]
    Pricing(String),

    #[error("Duplicate reward insert attempted for attraction {attraction_id}")]
    DuplicateReward { attraction_id: Uuid },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
