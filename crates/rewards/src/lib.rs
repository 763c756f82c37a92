//! Reward attribution: proximity thresholds and the concurrent matching
//! engine that awards each attraction at most once per user.

pub mod engine;
pub mod proximity;

pub use engine::{FailedMatch, RewardOutcome, RewardsEngine};
pub use proximity::ProximityEvaluator;
