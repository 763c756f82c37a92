//! TrailPoint core: domain types, geographic math, configuration, and the
//! seams to the external collaborators (catalog, oracle, GPS feed, pricer).

pub mod config;
pub mod error;
pub mod geo;
pub mod providers;
pub mod types;
pub mod user;

pub use config::AppConfig;
pub use error::{TrailPointError, TrailPointResult};
