use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{Result, SchedulerError},
    schedule::compute_next_run,
    types::{DailySchedule, Job},
};

/// In-memory recurring-job scheduler driven at ±1 s precision.
///
/// Jobs live only for the lifetime of the process. A fire that was due while
/// the process was down is never replayed; after a long stall a job fires
/// once and then resumes its normal cadence.
pub struct SchedulerEngine {
    tz: Tz,
    jobs: Vec<Job>,
    /// Fired jobs are sent here for delivery routing.
    fired_tx: mpsc::Sender<Job>,
}

impl SchedulerEngine {
    /// Create an engine that evaluates every schedule in `tz`.
    ///
    /// The sender is non-blocking (`try_send`) so the tick loop is never stalled.
    pub fn new(tz: Tz, fired_tx: mpsc::Sender<Job>) -> Self {
        Self {
            tz,
            jobs: Vec::new(),
            fired_tx,
        }
    }

    /// Register a recurring job. Returns the fully populated [`Job`] record.
    pub fn add_job(&mut self, name: &str, schedule: DailySchedule) -> Result<Job> {
        let next = compute_next_run(&schedule, Utc::now(), self.tz).ok_or_else(|| {
            SchedulerError::NoUpcomingRun {
                name: name.to_string(),
            }
        })?;

        let job = Job {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            schedule,
            next_run: Some(next),
            last_run: None,
            run_count: 0,
        };

        info!(job_id = %job.id, %name, at = %schedule, next_run = %next, "job added");
        self.jobs.push(job.clone());
        Ok(job)
    }

    /// Return all registered jobs in registration order.
    pub fn list_jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Main event loop. Polls every second until `shutdown` broadcasts `true`.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(jobs = self.jobs.len(), tz = %self.tz, "scheduler engine started");

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick(Utc::now());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("scheduler engine shutting down");
                        break;
                    }
                }
            }
        }
    }

    // --- private helpers ---------------------------------------------------

    /// Fire every job whose next_run has arrived and reschedule it.
    fn tick(&mut self, now: DateTime<Utc>) {
        for job in self.jobs.iter_mut() {
            let due = job.next_run.is_some_and(|at| at <= now);
            if !due {
                continue;
            }

            job.run_count += 1;
            job.last_run = Some(now);
            job.next_run = compute_next_run(&job.schedule, now, self.tz);

            info!(job_id = %job.id, name = %job.name, run = job.run_count, "firing job");
            if job.next_run.is_none() {
                warn!(job_id = %job.id, name = %job.name, "no further run could be computed");
            }

            if self.fired_tx.try_send(job.clone()).is_err() {
                warn!(job_id = %job.id, "delivery channel full or closed, job dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn engine() -> (SchedulerEngine, mpsc::Receiver<Job>) {
        let (tx, rx) = mpsc::channel(16);
        (SchedulerEngine::new(chrono_tz::Asia::Tokyo, tx), rx)
    }

    #[test]
    fn add_job_computes_next_run() {
        let (mut engine, _rx) = engine();
        let job = engine
            .add_job("08:00", DailySchedule { hour: 8, minute: 0 })
            .unwrap();

        let next = job.next_run.unwrap();
        assert!(next > Utc::now());
        assert!(next - Utc::now() <= Duration::days(1));
        assert_eq!(engine.list_jobs().len(), 1);
        assert_eq!(job.run_count, 0);
    }

    #[test]
    fn due_job_fires_once_and_reschedules() {
        let (mut engine, mut rx) = engine();
        engine
            .add_job("12:00", DailySchedule { hour: 12, minute: 0 })
            .unwrap();

        // Pretend the run came due: 12:00:00 JST today.
        let due = Utc.with_ymd_and_hms(2026, 10, 19, 3, 0, 0).unwrap();
        engine.jobs[0].next_run = Some(due);

        engine.tick(due - Duration::seconds(1));
        assert!(rx.try_recv().is_err());

        engine.tick(due);
        let fired = rx.try_recv().unwrap();
        assert_eq!(fired.name, "12:00");
        assert_eq!(fired.run_count, 1);
        assert_eq!(fired.next_run, Some(due + Duration::days(1)));

        // Same instant again: already rescheduled, nothing fires.
        engine.tick(due);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn jobs_fire_independently() {
        let (mut engine, mut rx) = engine();
        engine.add_job("08:00", DailySchedule { hour: 8, minute: 0 }).unwrap();
        engine.add_job("17:00", DailySchedule { hour: 17, minute: 0 }).unwrap();

        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        engine.jobs[0].next_run = Some(now);
        engine.jobs[1].next_run = Some(now + Duration::hours(9));

        engine.tick(now);
        assert_eq!(rx.try_recv().unwrap().name, "08:00");
        assert!(rx.try_recv().is_err());
        assert_eq!(engine.jobs[1].run_count, 0);
    }

    #[test]
    fn long_stall_does_not_replay_missed_runs() {
        let (mut engine, mut rx) = engine();
        engine.add_job("08:00", DailySchedule { hour: 8, minute: 0 }).unwrap();

        let missed = Utc.with_ymd_and_hms(2026, 10, 15, 23, 0, 0).unwrap();
        engine.jobs[0].next_run = Some(missed);

        let now = missed + Duration::days(3) + Duration::hours(2);
        engine.tick(now);
        assert_eq!(rx.try_recv().unwrap().run_count, 1);
        assert!(rx.try_recv().is_err());
        assert!(engine.jobs[0].next_run.unwrap() > now);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let (engine, _rx) = engine();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(engine.run(shutdown_rx));
        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
