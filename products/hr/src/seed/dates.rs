use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;

pub const UPDATE_WINDOW_SECS: i64 = 366 * 24 * 3600;

pub fn earliest_hire_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmployeeDates {
    pub hire_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Hire date uniform in `2010-01-01..=today`, creation at a random time that
/// day, last update up to a year later. Both timestamps are clamped to `now`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> EmployeeDates {
    let today = now.date();
    let start = earliest_hire_date().min(today);
    let span = (today - start).num_days();
    let hire_date = start + Duration::days(rng.gen_range(0..=span));

    let time = NaiveTime::from_hms_opt(
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60),
    )
    .unwrap_or(NaiveTime::MIN);
    let created_at = hire_date.and_time(time).min(now);
    let updated_at =
        (created_at + Duration::seconds(rng.gen_range(1..UPDATE_WINDOW_SECS))).min(now);

    EmployeeDates {
        hire_date,
        created_at,
        updated_at,
    }
}
