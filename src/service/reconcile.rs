use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime};
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait, sea_query::{Expr, OnConflict}};
use serde::Serialize;
use uuid::Uuid;

use crate::consts::{BASELINE_SHIFT_HOURS, LATE_GRACE_MINUTES};
use crate::entity::{daily_attendance, employee, prelude::*, scan_event, shift_schedule, sea_orm_active_enums::{AttendanceStatus, DayType, PayCategory}};
use crate::error::AppError;
use crate::service::{calendar, compensation::{self, SupplementalPay}, period::{self, Period}};

#[derive(Debug, Serialize)]
pub struct ReconcileOutcome {
    pub processed: u32,
    pub errors: Vec<String>,
}

/// Turns unprocessed scan events into daily attendance rows, exactly once
/// per event. The whole batch runs in one transaction; a group that fails
/// is reported and left unprocessed for the next run.
pub async fn process_unprocessed_scans<C>(db: &C) -> Result<ReconcileOutcome, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let scans = ScanEvent::find()
        .filter(scan_event::Column::IsProcessed.eq(false))
        .order_by_asc(scan_event::Column::ScannedAt)
        .all(&txn).await?;

    let mut outcome = ReconcileOutcome { processed: 0, errors: Vec::new() };

    for ((badge, date), group) in group_scans(scans) {
        let employee = Employee::find()
            .filter(employee::Column::BadgeNumber.eq(&badge))
            .one(&txn).await?;

        let Some(employee) = employee else {
            tracing::warn!(badge = %badge, %date, "no employee for badge, marking scans processed");
            mark_processed(&txn, &group).await?;
            outcome.errors.push(format!("no employee with badge {badge} for {date}"));
            continue;
        };

        match reconcile_day(&txn, &employee, date, &group).await {
            Ok(()) => {
                mark_processed(&txn, &group).await?;
                outcome.processed += 1;
            }
            Err(err) => {
                tracing::error!(error = %err, badge = %badge, %date, "failed to reconcile day");
                outcome.errors.push(format!("{badge} {date}: {err}"));
            }
        }
    }

    txn.commit().await?;

    Ok(outcome)
}

/// Groups time-ordered scans by badge and local calendar date, keeping the
/// per-group time order.
pub(crate) fn group_scans(
    scans: Vec<scan_event::Model>,
) -> BTreeMap<(String, NaiveDate), Vec<scan_event::Model>> {
    let mut groups: BTreeMap<(String, NaiveDate), Vec<scan_event::Model>> = BTreeMap::new();

    for scan in scans {
        let key = (scan.badge_number.clone(), scan.scanned_at.date_naive());
        groups.entry(key).or_default().push(scan);
    }

    groups
}

async fn reconcile_day<C: ConnectionTrait>(
    txn: &C,
    employee: &employee::Model,
    date: NaiveDate,
    scans: &[scan_event::Model],
) -> Result<(), AppError> {
    let Some(first) = scans.first() else {
        return Ok(());
    };

    let clock_in = first.scanned_at;
    let clock_out = if scans.len() > 1 {
        scans.last().map(|scan| scan.scanned_at)
    } else {
        None
    };

    let day_type = calendar::day_type_for(txn, date).await?;
    let scheduled_in = scheduled_clock_in(txn, employee, date).await?;
    let status = attendance_status(&day_type, &clock_in, date, scheduled_in);
    let overtime_hours = overtime_for(&employee.pay_category, &clock_in, clock_out.as_ref());

    let current_period = Period::of(date);
    let premium_eligible = period::meets_premium_threshold(txn, employee.id, current_period).await?;

    let pay = match clock_out.as_ref() {
        Some(out) => {
            let rates = compensation::active_config(txn).await?;
            compensation::supplemental_pay(&employee.role, &day_type, overtime_hours, out, premium_eligible, &rates)
        }
        None => SupplementalPay::ZERO,
    };

    let now = Local::now().fixed_offset();
    upsert_attendance(txn, daily_attendance::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        employee_id: Set(employee.id),
        date: Set(date),
        clock_in: Set(Some(clock_in)),
        clock_out: Set(clock_out),
        status: Set(status.clone()),
        day_type: Set(day_type),
        overtime_hours: Set(overtime_hours),
        premium_eligible: Set(premium_eligible),
        overtime_pay: Set(pay.overtime_pay),
        premium: Set(pay.premium),
        meal_allowance: Set(pay.meal_allowance),
        total_supplemental: Set(pay.total),
    }).await?;

    period::refresh_counter(txn, employee.id, current_period).await?;

    tracing::info!(
        employee = %employee.full_name,
        %date,
        status = ?status,
        overtime_hours,
        total_supplemental = pay.total,
        "reconciled attendance day"
    );

    Ok(())
}

pub(crate) fn attendance_status(
    day_type: &DayType,
    clock_in: &DateTime<FixedOffset>,
    date: NaiveDate,
    scheduled_in: NaiveTime,
) -> AttendanceStatus {
    if *day_type == DayType::PublicHoliday {
        return AttendanceStatus::Holiday;
    }

    let deadline = date.and_time(scheduled_in) + Duration::minutes(LATE_GRACE_MINUTES);

    if clock_in.naive_local() <= deadline {
        AttendanceStatus::Present
    } else {
        AttendanceStatus::Late
    }
}

/// Piecework pay is settled outside the engine, so those employees never
/// accrue overtime; a day without a clock-out has no measurable overtime.
pub(crate) fn overtime_for(
    pay_category: &PayCategory,
    clock_in: &DateTime<FixedOffset>,
    clock_out: Option<&DateTime<FixedOffset>>,
) -> f64 {
    if *pay_category == PayCategory::Piecework {
        return 0.0;
    }

    clock_out.map(|out| overtime_hours(clock_in, out)).unwrap_or(0.0)
}

pub(crate) fn overtime_hours(clock_in: &DateTime<FixedOffset>, clock_out: &DateTime<FixedOffset>) -> f64 {
    let worked_hours = (*clock_out - *clock_in).num_minutes() as f64 / 60.0;

    (worked_hours - BASELINE_SHIFT_HOURS).max(0.0)
}

async fn scheduled_clock_in<C: ConnectionTrait>(
    txn: &C,
    employee: &employee::Model,
    date: NaiveDate,
) -> Result<NaiveTime, AppError> {
    if employee.uses_shift {
        let shift = ShiftSchedule::find()
            .filter(shift_schedule::Column::EmployeeId.eq(employee.id))
            .filter(shift_schedule::Column::Date.eq(date))
            .one(txn).await?;

        if let Some(shift) = shift {
            return Ok(shift.scheduled_in);
        }
    }

    Ok(employee.scheduled_in)
}

async fn upsert_attendance<C: ConnectionTrait>(
    txn: &C,
    row: daily_attendance::ActiveModel,
) -> Result<(), AppError> {
    DailyAttendance::insert(row)
        .on_conflict(
            OnConflict::columns([daily_attendance::Column::EmployeeId, daily_attendance::Column::Date])
                .update_columns([
                    daily_attendance::Column::ClockIn,
                    daily_attendance::Column::ClockOut,
                    daily_attendance::Column::Status,
                    daily_attendance::Column::DayType,
                    daily_attendance::Column::OvertimeHours,
                    daily_attendance::Column::PremiumEligible,
                    daily_attendance::Column::OvertimePay,
                    daily_attendance::Column::Premium,
                    daily_attendance::Column::MealAllowance,
                    daily_attendance::Column::TotalSupplemental,
                    daily_attendance::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(txn).await?;

    Ok(())
}

async fn mark_processed<C: ConnectionTrait>(
    txn: &C,
    scans: &[scan_event::Model],
) -> Result<(), AppError> {
    let ids: Vec<Uuid> = scans.iter().map(|scan| scan.id).collect();

    ScanEvent::update_many()
        .col_expr(scan_event::Column::IsProcessed, Expr::value(true))
        .col_expr(scan_event::Column::ProcessedAt, Expr::value(Local::now().fixed_offset()))
        .filter(scan_event::Column::Id.is_in(ids))
        .exec(txn).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::entity::{holiday, rate_config, sea_orm_active_enums::{EmployeeRole, EmployeeStatus, ScanDirection}};

    use super::*;

    fn scan(badge: &str, timestamp: DateTime<FixedOffset>) -> scan_event::Model {
        scan_event::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            device_sn: "FIO-1".to_string(),
            badge_number: badge.to_string(),
            scanned_at: timestamp,
            verify_mode: 1,
            direction: ScanDirection::In,
            is_processed: false,
            processed_at: None,
        }
    }

    fn production_employee(badge: &str) -> employee::Model {
        employee::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            badge_number: badge.to_string(),
            full_name: "Budi Santoso".to_string(),
            role: EmployeeRole::Production,
            pay_category: PayCategory::Monthly,
            monthly_salary: Some(5_000_000),
            daily_rate: None,
            scheduled_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            scheduled_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            uses_shift: false,
            status: EmployeeStatus::Active,
        }
    }

    fn rates() -> rate_config::Model {
        rate_config::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            premium_production: 100_000,
            premium_staff: 75_000,
            meal_weekday_production: 15_000,
            meal_weekend_5_10_production: 20_000,
            meal_weekend_10_20_production: 25_000,
            meal_weekday_staff: 12_000,
            meal_weekend_5_10_staff: 17_000,
            meal_weekend_10_20_staff: 22_000,
            overtime_rate_production: 50_000,
            overtime_rate_staff: 40_000,
            is_active: true,
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        Local.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap().fixed_offset()
    }

    #[test]
    fn test_group_scans_by_badge_and_date() {
        let scans = vec![
            scan("1001", at(2026, 6, 1, 7, 55)),
            scan("1001", at(2026, 6, 1, 17, 5)),
            scan("1002", at(2026, 6, 1, 8, 10)),
            scan("1001", at(2026, 6, 2, 7, 58)),
        ];

        let groups = group_scans(scans);

        assert_eq!(groups.len(), 3);

        let monday = &groups[&("1001".to_string(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())];
        assert_eq!(monday.len(), 2);
        assert!(monday[0].scanned_at <= monday[1].scanned_at);
    }

    #[test]
    fn test_attendance_status_grace_window() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let scheduled_in = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let on_time = attendance_status(&DayType::Weekday, &at(2026, 6, 1, 7, 59), date, scheduled_in);
        assert_eq!(on_time, AttendanceStatus::Present);

        let at_grace = attendance_status(&DayType::Weekday, &at(2026, 6, 1, 8, 30), date, scheduled_in);
        assert_eq!(at_grace, AttendanceStatus::Present);

        let late = attendance_status(&DayType::Weekday, &at(2026, 6, 1, 8, 31), date, scheduled_in);
        assert_eq!(late, AttendanceStatus::Late);

        let holiday = attendance_status(&DayType::PublicHoliday, &at(2026, 6, 1, 9, 30), date, scheduled_in);
        assert_eq!(holiday, AttendanceStatus::Holiday);
    }

    #[test]
    fn test_overtime_hours_baseline() {
        let clock_in = at(2026, 6, 1, 8, 0);

        assert_eq!(overtime_hours(&clock_in, &at(2026, 6, 1, 17, 0)), 0.0);
        assert_eq!(overtime_hours(&clock_in, &at(2026, 6, 1, 20, 0)), 3.0);
        assert_eq!(overtime_hours(&clock_in, &at(2026, 6, 1, 19, 30)), 2.5);
    }

    #[test]
    fn test_overtime_for_piecework_and_missing_clock_out() {
        let clock_in = at(2026, 6, 1, 8, 0);
        let clock_out = at(2026, 6, 1, 20, 0);

        assert_eq!(overtime_for(&PayCategory::Piecework, &clock_in, Some(&clock_out)), 0.0);
        assert_eq!(overtime_for(&PayCategory::Monthly, &clock_in, None), 0.0);
        assert_eq!(overtime_for(&PayCategory::Monthly, &clock_in, Some(&clock_out)), 3.0);
    }

    #[actix_web::test]
    async fn test_process_reconciles_one_day() {
        let employee = production_employee("1001");
        let scans = vec![
            scan("1001", at(2026, 6, 1, 7, 55)),
            scan("1001", at(2026, 6, 1, 17, 5)),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([scans])
            .append_query_results([vec![employee]])
            .append_query_results([Vec::<holiday::Model>::new()])
            .append_query_results([Vec::<daily_attendance::Model>::new()])
            .append_query_results([vec![rates()]])
            .append_query_results([Vec::<daily_attendance::Model>::new()])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 2 },
            ])
            .into_connection();

        let outcome = process_unprocessed_scans(&db).await.expect("reconciliation failed");

        assert_eq!(outcome.processed, 1);
        assert!(outcome.errors.is_empty());
    }

    #[actix_web::test]
    async fn test_process_tolerates_unknown_badge() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![scan("9999", at(2026, 6, 1, 7, 55))]])
            .append_query_results([Vec::<employee::Model>::new()])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .into_connection();

        let outcome = process_unprocessed_scans(&db).await.expect("reconciliation failed");

        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("9999"));
    }

    #[actix_web::test]
    async fn test_process_with_no_pending_scans_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<scan_event::Model>::new()])
            .into_connection();

        let outcome = process_unprocessed_scans(&db).await.expect("reconciliation failed");

        assert_eq!(outcome.processed, 0);
        assert!(outcome.errors.is_empty());
    }
}
