//! Persistence layer for HabitFlow data.
//!
//! A `Storage` trait abstraction with a JSON-file backend for normal use
//! and an in-memory backend for tests and ephemeral sessions.

#![warn(missing_docs)]

mod json_storage;
mod memory;
mod trait_;

pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use trait_::{Result, Storage, StorageError};
