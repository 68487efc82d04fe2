//! Achievement and title evaluation.
//!
//! Evaluation is idempotent: conditions are checked against the user's
//! aggregate and deduped through a materialized name set, so re-running an
//! evaluation never double-grants.

#![warn(missing_docs)]

mod catalog;
mod evaluator;
mod titles;

pub use catalog::{achievement, names, AchievementDef};
pub use evaluator::evaluate_achievements;
pub use titles::recompute_titles;
