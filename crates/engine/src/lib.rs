//! Gamification engine.
//!
//! `GamificationService` orchestrates the whole flow: it takes habit and
//! focus-timer events, runs the reward/achievement/title pipeline over
//! storage, and returns a two-phase outcome in which the primary operation
//! never fails because of gamification.

#![warn(missing_docs)]

mod error;
mod outcome;
mod service;

pub use error::EngineError;
pub use outcome::{CompletionOutcome, CompletionRecord, FocusOutcome, GrantBatch};
pub use service::GamificationService;
