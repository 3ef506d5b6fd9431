//! Background Tasks Module
//!
//! Contains optional background tasks that drive the cache from outside.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired cache entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
