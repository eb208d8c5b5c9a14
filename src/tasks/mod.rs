//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the hosting
//! session.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries at configured intervals

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle};
