//! Solving tasks end to end: normalize, scan, refine, and apply the TTL.
//!
//! A [`SolveTask`] goes through the [`Controller`] and comes out as exactly
//! one [`SolveOutcome`]. The controller never panics into its caller and never
//! returns an error; every failure is a tagged outcome.
//!
//! Around the controller, [`Worker`] pairs it with an [`OutcomeSink`] that
//! persists a [`TaskRecord`] per task, overwriting earlier records for the
//! same id so redelivered tasks are re-solved idempotently.

mod clock;
mod config;
mod controller;
mod outcome;
mod record;
mod sink;
mod task;
mod watch;
mod worker;

pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, SolveConfig};
pub use controller::Controller;
pub use outcome::{SolveOutcome, Status};
pub use record::TaskRecord;
pub use sink::{ChannelSink, JsonLinesSink, MemorySink, OutcomeSink, SinkError};
pub use task::SolveTask;
pub use worker::Worker;
