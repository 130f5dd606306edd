//! Attendance generation and gross pro-rating.
//!
//! Days with a recorded status keep it. Unrecorded weekend days are marked
//! as weekends, and every other day is drawn from a [`RandomSource`] so that
//! test runs can be made reproducible.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::{AttendanceDay, AttendanceRecord, AttendanceStatus, DateRange};

/// Upper bound of draws classified as present.
pub const PRESENT_THRESHOLD: f64 = 0.85;
/// Upper bound of draws classified as leave.
pub const LEAVE_THRESHOLD: f64 = 0.92;
/// Upper bound of draws classified as a half day. Anything above is absent.
pub const HALFDAY_THRESHOLD: f64 = 0.97;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next draw.
    fn next_unit(&mut self) -> f64;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// An empty sequence always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

impl SequenceSource {
    /// Creates a source that replays `values` in order.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

/// Maps a uniform draw to a working-day status.
pub fn classify_draw(draw: f64) -> AttendanceStatus {
    if draw < PRESENT_THRESHOLD {
        AttendanceStatus::Present
    } else if draw < LEAVE_THRESHOLD {
        AttendanceStatus::Leave
    } else if draw < HALFDAY_THRESHOLD {
        AttendanceStatus::Halfday
    } else {
        AttendanceStatus::Absent
    }
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Builds one employee's day-by-day attendance over `range`.
///
/// Records belonging to other employees or falling outside the range are
/// ignored. A draw is consumed only for unrecorded weekdays.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::{SequenceSource, generate_attendance};
/// use ctc_engine::models::{AttendanceStatus, DateRange};
/// use chrono::NaiveDate;
///
/// // Friday 6 March to Monday 9 March 2026
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
/// ).unwrap();
/// let mut source = SequenceSource::new(vec![0.10, 0.95]);
/// let days = generate_attendance("1", &range, &[], &mut source);
///
/// let statuses: Vec<_> = days.iter().map(|d| d.status).collect();
/// assert_eq!(statuses, vec![
///     AttendanceStatus::Present,
///     AttendanceStatus::Weekend,
///     AttendanceStatus::Weekend,
///     AttendanceStatus::Halfday,
/// ]);
/// ```
pub fn generate_attendance<S: RandomSource + ?Sized>(
    employee_id: &str,
    range: &DateRange,
    records: &[AttendanceRecord],
    source: &mut S,
) -> Vec<AttendanceDay> {
    let recorded: HashMap<NaiveDate, AttendanceStatus> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && range.contains(r.date))
        .map(|r| (r.date, r.status))
        .collect();

    range
        .days()
        .map(|date| {
            let status = match recorded.get(&date) {
                Some(status) => *status,
                None if is_weekend(date) => AttendanceStatus::Weekend,
                None => classify_draw(source.next_unit()),
            };
            AttendanceDay { date, status }
        })
        .collect()
}

/// Pro-rates a monthly figure by days worked: `monthly / divisor × days`.
///
/// Zero when `divisor` is zero.
pub fn prorate_gross(monthly_ctc: Decimal, days_worked: Decimal, divisor_days: u32) -> Decimal {
    if divisor_days == 0 {
        return Decimal::ZERO;
    }
    monthly_ctc / Decimal::from(divisor_days) * days_worked
}
