use std::{fmt, str::FromStr};

use chrono::{Datelike as _, Local, NaiveDate};
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::OnConflict};
use uuid::Uuid;

use crate::consts::PREMIUM_THRESHOLD_DAYS;
use crate::entity::{daily_attendance, period_attendance, prelude::*, sea_orm_active_enums::AttendanceStatus};
use crate::error::AppError;
use crate::utils;

/// A payroll month in `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn of(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn previous(&self) -> Self {
        match self.month {
            1 => Self { year: self.year - 1, month: 12 },
            _ => Self { year: self.year, month: self.month - 1 },
        }
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap();

        (first, utils::last_of_month(first))
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("invalid period `{value}`, expected YYYY-MM"));

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Days that count towards the premium threshold.
pub fn qualifying_days(rows: &[daily_attendance::Model]) -> i32 {
    rows.iter()
        .filter(|row| matches!(row.status, AttendanceStatus::Present | AttendanceStatus::Late))
        .count() as i32
}

pub async fn attendance_in_period<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
) -> Result<Vec<daily_attendance::Model>, AppError> {
    let (start, end) = period.bounds();

    Ok(DailyAttendance::find()
        .filter(daily_attendance::Column::EmployeeId.eq(employee_id))
        .filter(daily_attendance::Column::Date.between(start, end))
        .all(db).await?)
}

pub async fn meets_premium_threshold<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
) -> Result<bool, AppError> {
    let rows = attendance_in_period(db, employee_id, period).await?;

    Ok(qualifying_days(&rows) >= PREMIUM_THRESHOLD_DAYS)
}

/// Recounts the whole period from its attendance rows. Scans arrive out of
/// order and get backfilled, so the counter is never trusted incrementally.
pub async fn refresh_counter<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    period: Period,
) -> Result<(), AppError> {
    let rows = attendance_in_period(db, employee_id, period).await?;
    let days = qualifying_days(&rows);
    let now = Local::now().fixed_offset();

    let counter = period_attendance::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        employee_id: Set(employee_id),
        period: Set(period.to_string()),
        qualifying_days: Set(days),
        meets_premium_threshold: Set(days >= PREMIUM_THRESHOLD_DAYS),
    };

    PeriodAttendance::insert(counter)
        .on_conflict(
            OnConflict::columns([period_attendance::Column::EmployeeId, period_attendance::Column::Period])
                .update_columns([
                    period_attendance::Column::QualifyingDays,
                    period_attendance::Column::MeetsPremiumThreshold,
                    period_attendance::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use crate::entity::sea_orm_active_enums::DayType;

    use super::*;

    fn attendance_row(status: AttendanceStatus) -> daily_attendance::Model {
        daily_attendance::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            clock_in: Some(Local::now().into()),
            clock_out: None,
            status,
            day_type: DayType::Weekday,
            overtime_hours: 0.0,
            premium_eligible: false,
            overtime_pay: 0,
            premium: 0,
            meal_allowance: 0,
            total_supplemental: 0,
        }
    }

    #[test]
    fn test_period_parsing() {
        let period: Period = "2026-06".parse().unwrap();
        assert_eq!(period.to_string(), "2026-06");
        assert_eq!(
            period.bounds(),
            (NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()),
        );

        assert!("2026".parse::<Period>().is_err());
        assert!("2026-13".parse::<Period>().is_err());
        assert!("junk-06".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_previous_wraps_year() {
        let january: Period = "2026-01".parse().unwrap();
        assert_eq!(january.previous().to_string(), "2025-12");

        let june: Period = "2026-06".parse().unwrap();
        assert_eq!(june.previous().to_string(), "2026-05");
    }

    #[test]
    fn test_qualifying_days_counts_present_and_late_only() {
        let rows = vec![
            attendance_row(AttendanceStatus::Present),
            attendance_row(AttendanceStatus::Late),
            attendance_row(AttendanceStatus::Leave),
            attendance_row(AttendanceStatus::SickLeave),
            attendance_row(AttendanceStatus::Absent),
            attendance_row(AttendanceStatus::Holiday),
        ];

        assert_eq!(qualifying_days(&rows), 2);
    }

    #[test]
    fn test_backfilled_day_flips_threshold() {
        let mut rows: Vec<_> = (0..5).map(|_| attendance_row(AttendanceStatus::Present)).collect();
        assert!(qualifying_days(&rows) < PREMIUM_THRESHOLD_DAYS);

        // A backfilled day counts no matter where it lands chronologically.
        rows.insert(0, attendance_row(AttendanceStatus::Late));
        assert!(qualifying_days(&rows) >= PREMIUM_THRESHOLD_DAYS);
    }
}
