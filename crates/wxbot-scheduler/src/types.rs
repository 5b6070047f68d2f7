use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Fire every day at `hour:minute` in the engine's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub hour: u8,
    pub minute: u8,
}

impl DailySchedule {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

impl fmt::Display for DailySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for DailySchedule {
    type Err = SchedulerError;

    /// Accepts `HH:MM` or a five-field daily cron expression (`M H * * *`).
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SchedulerError::InvalidSchedule {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = spec.trim();
        let (hour, minute) = if let Some((h, m)) = trimmed.split_once(':') {
            (h, m)
        } else {
            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            match fields.as_slice() {
                [m, h, "*", "*", "*"] => (*h, *m),
                [_, _, _, _, _] => {
                    return Err(invalid("only daily cron expressions (M H * * *) are supported"))
                }
                _ => return Err(invalid("expected HH:MM or a five-field cron expression")),
            }
        };

        let hour: u8 = hour.parse().map_err(|_| invalid("hour is not a number"))?;
        let minute: u8 = minute.parse().map_err(|_| invalid("minute is not a number"))?;
        DailySchedule::new(hour, minute).ok_or_else(|| invalid("time of day out of range"))
    }
}

/// A registered recurring job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// UUID v4 string.
    pub id: String,
    /// Human-readable label, also the report period label.
    pub name: String,
    pub schedule: DailySchedule,
    /// Next planned execution, if any.
    pub next_run: Option<DateTime<Utc>>,
    /// Most recent execution, if any.
    pub last_run: Option<DateTime<Utc>>,
    /// Number of times this job has fired since startup.
    pub run_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_time() {
        assert_eq!("08:00".parse::<DailySchedule>().unwrap(), DailySchedule { hour: 8, minute: 0 });
        assert_eq!("7:05".parse::<DailySchedule>().unwrap(), DailySchedule { hour: 7, minute: 5 });
    }

    #[test]
    fn parses_daily_cron() {
        assert_eq!(
            "0 17 * * *".parse::<DailySchedule>().unwrap(),
            DailySchedule { hour: 17, minute: 0 }
        );
        assert_eq!(
            "30 6 * * *".parse::<DailySchedule>().unwrap(),
            DailySchedule { hour: 6, minute: 30 }
        );
    }

    #[test]
    fn rejects_non_daily_and_out_of_range() {
        assert!("0 8 * * 1".parse::<DailySchedule>().is_err());
        assert!("*/5 * * * *".parse::<DailySchedule>().is_err());
        assert!("24:00".parse::<DailySchedule>().is_err());
        assert!("12:60".parse::<DailySchedule>().is_err());
        assert!("noon".parse::<DailySchedule>().is_err());
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(DailySchedule { hour: 8, minute: 5 }.to_string(), "08:05");
    }
}
