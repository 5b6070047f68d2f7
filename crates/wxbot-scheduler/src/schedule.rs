use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::DailySchedule;

/// Compute the next UTC execution time for `schedule` strictly *after* `from`,
/// evaluating the time of day in `tz`.
///
/// A wall-clock time skipped by a DST transition moves to the next day on
/// which it exists. Returns `None` only if no such day is found within a week.
pub fn compute_next_run(
    schedule: &DailySchedule,
    from: DateTime<Utc>,
    tz: Tz,
) -> Option<DateTime<Utc>> {
    let local_today = from.with_timezone(&tz).date_naive();

    (0..=7).find_map(|offset| {
        let day = local_today + Duration::days(offset);
        let naive = day.and_hms_opt(schedule.hour as u32, schedule.minute as u32, 0)?;
        let candidate = tz.from_local_datetime(&naive).earliest()?.with_timezone(&Utc);
        (candidate > from).then_some(candidate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Tokyo;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn later_today_in_local_zone() {
        // 06:00 JST == 21:00 UTC the previous day.
        let from = utc(2026, 10, 18, 21, 0);
        let next = compute_next_run(&DailySchedule { hour: 8, minute: 0 }, from, Tokyo);
        assert_eq!(next, Some(utc(2026, 10, 18, 23, 0)));
    }

    #[test]
    fn passed_today_rolls_to_tomorrow() {
        // 13:00 JST.
        let from = utc(2026, 10, 19, 4, 0);
        let next = compute_next_run(&DailySchedule { hour: 12, minute: 0 }, from, Tokyo);
        assert_eq!(next, Some(utc(2026, 10, 20, 3, 0)));
    }

    #[test]
    fn exact_fire_instant_is_not_reused() {
        let from = utc(2026, 10, 19, 8, 0);
        let next = compute_next_run(&DailySchedule { hour: 17, minute: 0 }, from, Tokyo);
        assert_eq!(next, Some(utc(2026, 10, 20, 8, 0)));
    }

    #[test]
    fn dst_gap_moves_to_next_day() {
        // 02:30 does not exist in New York on 2026-03-08.
        let tz = chrono_tz::America::New_York;
        let from = utc(2026, 3, 8, 5, 0); // 00:00 EST
        let next = compute_next_run(&DailySchedule { hour: 2, minute: 30 }, from, tz).unwrap();
        assert_eq!(next, utc(2026, 3, 9, 6, 30)); // 02:30 EDT
    }
}
