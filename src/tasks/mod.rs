//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: drops expired entries from the in-process memory store.
//!   Redis expires keys on its own and needs no task.

mod sweeper;

pub use sweeper::{spawn_sweeper, DEFAULT_SWEEP_INTERVAL};
