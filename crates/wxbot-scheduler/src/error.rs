use thiserror::Error;

/// Errors that can occur within the scheduler subsystem.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The time spec is neither `HH:MM` nor a daily cron expression.
    #[error("Invalid schedule '{spec}': {reason}")]
    InvalidSchedule { spec: String, reason: String },

    /// The time of day has no next occurrence in the engine's timezone.
    #[error("No upcoming run for job '{name}'")]
    NoUpcomingRun { name: String },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
