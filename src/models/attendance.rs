//! Attendance models.
//!
//! This module contains the per-day attendance types, the [`AttendanceSummary`]
//! derived from them, and the [`DateRange`] a payroll test run covers.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The attendance status of one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Worked the full day.
    Present,
    /// Did not work and was not on leave.
    Absent,
    /// On approved leave.
    Leave,
    /// Worked half the day.
    #[serde(alias = "half_day")]
    Halfday,
    /// Saturday or Sunday.
    Weekend,
    /// Laid off by the employer.
    #[serde(alias = "lay_off")]
    Layoff,
}

/// An attendance status on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The date.
    pub date: NaiveDate,
    /// The status on that date.
    pub status: AttendanceStatus,
}

/// A recorded attendance entry for an employee, as fetched from the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The date.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
}

/// Counts of each status across a run of attendance days.
///
/// # Example
///
/// ```
/// use ctc_engine::models::{AttendanceDay, AttendanceStatus, AttendanceSummary};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let day = |d, status| AttendanceDay {
///     date: NaiveDate::from_ymd_opt(2026, 3, d).unwrap(),
///     status,
/// };
/// let summary = AttendanceSummary::from_days(&[
///     day(2, AttendanceStatus::Present),
///     day(3, AttendanceStatus::Halfday),
///     day(7, AttendanceStatus::Weekend),
/// ]);
/// assert_eq!(summary.days_worked, dec!(1.5));
/// assert_eq!(summary.working_days, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days in the record.
    pub total_days: u32,
    /// Weekend days.
    pub weekend_days: u32,
    /// Total days minus weekend days.
    pub working_days: u32,
    /// Full days present.
    pub present_days: u32,
    /// Half days.
    pub half_days: u32,
    /// Leave days.
    pub leave_days: u32,
    /// Absent days.
    pub absent_days: u32,
    /// Lay-off days.
    pub layoff_days: u32,
    /// Present days plus half of the half days.
    pub days_worked: Decimal,
}

impl AttendanceSummary {
    /// Summarises a run of attendance days.
    pub fn from_days(days: &[AttendanceDay]) -> Self {
        let mut summary = AttendanceSummary {
            total_days: days.len() as u32,
            ..Default::default()
        };

        for day in days {
            match day.status {
                AttendanceStatus::Present => summary.present_days += 1,
                AttendanceStatus::Absent => summary.absent_days += 1,
                AttendanceStatus::Leave => summary.leave_days += 1,
                AttendanceStatus::Halfday => summary.half_days += 1,
                AttendanceStatus::Weekend => summary.weekend_days += 1,
                AttendanceStatus::Layoff => summary.layoff_days += 1,
            }
        }

        summary.working_days = summary.total_days - summary.weekend_days;
        summary.days_worked =
            Decimal::from(summary.present_days) + Decimal::from(summary.half_days) / Decimal::TWO;
        summary
    }
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Longest range accepted, in days.
    pub const MAX_DAYS: u32 = 366;

    /// Creates a range, rejecting one that ends before it starts or spans
    /// more than [`DateRange::MAX_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end });
        }
        let days = (end - start).num_days() + 1;
        if days > i64::from(Self::MAX_DAYS) {
            return Err(EngineError::invalid_input(
                "date_range",
                format!(
                    "{} to {} spans {} days; at most {} are allowed",
                    start,
                    end,
                    days,
                    Self::MAX_DAYS
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Checks if a date falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Date ranges offered by the payroll test run screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum DateRangePreset {
    /// The fifteen days ending today.
    #[default]
    Last15,
    /// The thirty days ending today.
    Last30,
    /// The calendar month containing today.
    CurrentMonth,
    /// An explicit range.
    Custom {
        /// First day (inclusive).
        start: NaiveDate,
        /// Last day (inclusive).
        end: NaiveDate,
    },
}

impl DateRangePreset {
    /// Resolves the preset against an explicit `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use ctc_engine::models::DateRangePreset;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
    /// let range = DateRangePreset::CurrentMonth.resolve(today).unwrap();
    /// assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    /// assert_eq!(range.end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    /// ```
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<DateRange> {
        match *self {
            DateRangePreset::Last15 => trailing_days(today, 15),
            DateRangePreset::Last30 => trailing_days(today, 30),
            DateRangePreset::CurrentMonth => {
                let start = today.with_day(1).ok_or_else(|| month_error(today))?;
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .ok_or_else(|| month_error(today))?;
                DateRange::new(start, end)
            }
            DateRangePreset::Custom { start, end } => DateRange::new(start, end),
        }
    }
}

fn trailing_days(today: NaiveDate, count: u64) -> EngineResult<DateRange> {
    let start = today
        .checked_sub_days(Days::new(count - 1))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("cannot go back {} days from {}", count, today),
        })?;
    DateRange::new(start, today)
}

fn month_error(today: NaiveDate) -> EngineError {
    EngineError::CalculationError {
        message: format!("cannot resolve the month containing {}", today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_counts_each_status() {
        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Halfday,
            AttendanceStatus::Leave,
            AttendanceStatus::Absent,
            AttendanceStatus::Weekend,
            AttendanceStatus::Weekend,
            AttendanceStatus::Layoff,
        ];
        let days: Vec<AttendanceDay> = statuses
            .iter()
            .enumerate()
            .map(|(i, &status)| AttendanceDay {
                date: date(2026, 3, i as u32 + 1),
                status,
            })
            .collect();

        let summary = AttendanceSummary::from_days(&days);
        assert_eq!(summary.total_days, 8);
        assert_eq!(summary.weekend_days, 2);
        assert_eq!(summary.working_days, 6);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.leave_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.layoff_days, 1);
        assert_eq!(summary.days_worked, dec!(2.5));
    }

    #[test]
    fn test_summary_of_empty_record() {
        let summary = AttendanceSummary::from_days(&[]);
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.days_worked, Decimal::ZERO);
    }

    #[test]
    fn test_status_accepts_underscored_aliases() {
        let status: AttendanceStatus = serde_json::from_str("\"half_day\"").unwrap();
        assert_eq!(status, AttendanceStatus::Halfday);
        let status: AttendanceStatus = serde_json::from_str("\"halfday\"").unwrap();
        assert_eq!(status, AttendanceStatus::Halfday);
    }

    #[test]
    fn test_date_range_rejects_reversed_dates() {
        let result = DateRange::new(date(2026, 3, 10), date(2026, 3, 1));
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_date_range_caps_length() {
        // 2028 is a leap year: 366 days fit, 367 do not
        let full_year = DateRange::new(date(2028, 1, 1), date(2028, 12, 31)).unwrap();
        assert_eq!(full_year.len_days(), DateRange::MAX_DAYS);
        assert!(DateRange::new(date(2028, 1, 1), date(2029, 1, 1)).is_err());

        let preset = DateRangePreset::Custom {
            start: date(1, 1, 1),
            end: date(9999, 12, 31),
        };
        match preset.resolve(date(2026, 3, 15)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "date_range"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_date_range_days_inclusive() {
        let range = DateRange::new(date(2026, 3, 1), date(2026, 3, 5)).unwrap();
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(range.len_days(), 5);
        assert_eq!(days[0], date(2026, 3, 1));
        assert_eq!(days[4], date(2026, 3, 5));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2026, 3, 1), date(2026, 3, 1)).unwrap();
        assert_eq!(range.days().count(), 1);
        assert!(range.contains(date(2026, 3, 1)));
        assert!(!range.contains(date(2026, 3, 2)));
    }

    #[test]
    fn test_last15_preset_includes_today() {
        let range = DateRangePreset::Last15.resolve(date(2026, 3, 20)).unwrap();
        assert_eq!(range.start, date(2026, 3, 6));
        assert_eq!(range.end, date(2026, 3, 20));
        assert_eq!(range.len_days(), 15);
    }

    #[test]
    fn test_last30_preset_crosses_month() {
        let range = DateRangePreset::Last30.resolve(date(2026, 3, 10)).unwrap();
        assert_eq!(range.start, date(2026, 2, 9));
        assert_eq!(range.len_days(), 30);
    }

    #[test]
    fn test_current_month_in_leap_february() {
        let range = DateRangePreset::CurrentMonth
            .resolve(date(2028, 2, 3))
            .unwrap();
        assert_eq!(range.end, date(2028, 2, 29));
    }

    #[test]
    fn test_current_month_december() {
        let range = DateRangePreset::CurrentMonth
            .resolve(date(2026, 12, 31))
            .unwrap();
        assert_eq!(range.start, date(2026, 12, 1));
        assert_eq!(range.end, date(2026, 12, 31));
    }

    #[test]
    fn test_preset_deserialization() {
        let preset: DateRangePreset = serde_json::from_str(r#"{"preset":"last30"}"#).unwrap();
        assert_eq!(preset, DateRangePreset::Last30);

        let preset: DateRangePreset = serde_json::from_str(
            r#"{"preset":"custom","start":"2026-01-01","end":"2026-01-15"}"#,
        )
        .unwrap();
        assert_eq!(
            preset,
            DateRangePreset::Custom {
                start: date(2026, 1, 1),
                end: date(2026, 1, 15)
            }
        );
    }
}
