//! Background location tracking: the user registry, the polling loop that
//! records positions and triggers reward matching, and seed-user generation
//! for test mode.

pub mod registry;
pub mod seed;
pub mod tracker;

pub use registry::UserRegistry;
pub use tracker::{LocationTracker, TrackerHandle};
