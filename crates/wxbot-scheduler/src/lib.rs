//! `wxbot-scheduler`: Tokio-based daily job scheduler.
//!
//! # Overview
//!
//! Jobs are held in memory. The [`engine::SchedulerEngine`] ticks every
//! second and forwards any job whose `next_run` has arrived over an mpsc
//! channel, then computes the following run in the configured timezone.
//!
//! Time specs are `HH:MM` or a daily cron expression (`M H * * *`); see
//! [`types::DailySchedule`].

pub mod engine;
pub mod error;
pub mod schedule;
pub mod types;

pub use engine::SchedulerEngine;
pub use error::{Result, SchedulerError};
pub use types::{DailySchedule, Job};
