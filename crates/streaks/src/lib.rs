//! Streak and period-reset bookkeeping.
//!
//! Calendar periods roll over without any user action, so habits need a
//! correction pass: pure predicates decide which habits to touch and a
//! runner applies the writes in one batch.

#![warn(missing_docs)]

mod calculator;
mod runner;

pub use calculator::{
    completion_rate, next_reset_time, should_break_streak, should_reset,
};
pub use runner::{run_reset_pass, ResetSummary};
