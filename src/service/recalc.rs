use std::collections::BTreeSet;

use chrono::Local;
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::entity::{daily_attendance, prelude::*};
use crate::error::AppError;
use crate::service::{calendar, compensation, period::{self, Period}, reconcile};

#[derive(Debug, Serialize)]
pub struct RecalcOutcome {
    pub updated: u32,
    pub errors: Vec<String>,
}

/// Re-runs the rule engine over the existing attendance rows of a period,
/// for use after a rate-config change or a manual data correction. Rows
/// without a full clock-in/clock-out pair are left untouched.
pub async fn recalculate_period<C>(
    db: &C,
    target: Period,
    employee_filter: Option<Uuid>,
) -> Result<RecalcOutcome, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let (start, end) = target.bounds();

    let mut query = DailyAttendance::find()
        .filter(daily_attendance::Column::Date.between(start, end));

    if let Some(employee_id) = employee_filter {
        query = query.filter(daily_attendance::Column::EmployeeId.eq(employee_id));
    }

    let rows = query.all(&txn).await?;
    let rates = compensation::active_config(&txn).await?;

    let mut outcome = RecalcOutcome { updated: 0, errors: Vec::new() };
    let mut touched: BTreeSet<Uuid> = BTreeSet::new();

    for row in rows {
        let (Some(clock_in), Some(clock_out)) = (row.clock_in, row.clock_out) else {
            continue;
        };

        let Some(employee) = Employee::find_by_id(row.employee_id).one(&txn).await? else {
            outcome.errors.push(format!("attendance {} references a missing employee", row.id));
            continue;
        };

        let day_type = calendar::day_type_for(&txn, row.date).await?;
        let overtime_hours = reconcile::overtime_for(&employee.pay_category, &clock_in, Some(&clock_out));
        let premium_eligible = period::meets_premium_threshold(&txn, employee.id, target).await?;
        let pay = compensation::supplemental_pay(&employee.role, &day_type, overtime_hours, &clock_out, premium_eligible, &rates);

        let changes = daily_attendance::ActiveModel {
            day_type: Set(day_type),
            overtime_hours: Set(overtime_hours),
            premium_eligible: Set(premium_eligible),
            overtime_pay: Set(pay.overtime_pay),
            premium: Set(pay.premium),
            meal_allowance: Set(pay.meal_allowance),
            total_supplemental: Set(pay.total),
            updated_at: Set(Local::now().fixed_offset()),
            ..Default::default()
        };

        DailyAttendance::update_many()
            .set(changes)
            .filter(daily_attendance::Column::Id.eq(row.id))
            .exec(&txn).await?;

        touched.insert(employee.id);
        outcome.updated += 1;
    }

    for employee_id in touched {
        period::refresh_counter(&txn, employee_id, target).await?;
    }

    txn.commit().await?;

    tracing::info!(period = %target, updated = outcome.updated, "recalculated supplemental pay");

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone as _};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::entity::{employee, holiday, rate_config, sea_orm_active_enums::{AttendanceStatus, DayType, EmployeeRole, EmployeeStatus, PayCategory}};

    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        chrono::Local.with_ymd_and_hms(2026, 6, day, hour, minute, 0).unwrap().fixed_offset()
    }

    #[actix_web::test]
    async fn test_recalculate_updates_clocked_rows() {
        let employee = employee::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            badge_number: "1001".to_string(),
            full_name: "Budi Santoso".to_string(),
            role: EmployeeRole::Production,
            pay_category: PayCategory::Monthly,
            monthly_salary: Some(5_000_000),
            daily_rate: None,
            scheduled_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            scheduled_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            uses_shift: false,
            status: EmployeeStatus::Active,
        };

        let row = daily_attendance::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            employee_id: employee.id,
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            clock_in: Some(at(1, 8, 0)),
            clock_out: Some(at(1, 20, 0)),
            status: AttendanceStatus::Present,
            day_type: DayType::Weekday,
            overtime_hours: 0.0,
            premium_eligible: false,
            overtime_pay: 0,
            premium: 0,
            meal_allowance: 0,
            total_supplemental: 0,
        };

        let rates = rate_config::Model {
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
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .append_query_results([vec![rates]])
            .append_query_results([vec![employee]])
            .append_query_results([Vec::<holiday::Model>::new()])
            .append_query_results([Vec::<daily_attendance::Model>::new()])
            .append_query_results([Vec::<daily_attendance::Model>::new()])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .into_connection();

        let target: Period = "2026-06".parse().unwrap();
        let outcome = recalculate_period(&db, target, None).await.expect("recalculation failed");

        assert_eq!(outcome.updated, 1);
        assert!(outcome.errors.is_empty());
    }

    #[actix_web::test]
    async fn test_recalculate_skips_rows_without_clock_out() {
        let row = daily_attendance::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            employee_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            clock_in: Some(at(1, 8, 0)),
            clock_out: None,
            status: AttendanceStatus::Present,
            day_type: DayType::Weekday,
            overtime_hours: 0.0,
            premium_eligible: false,
            overtime_pay: 0,
            premium: 0,
            meal_allowance: 0,
            total_supplemental: 0,
        };

        let rates = rate_config::Model {
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
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .append_query_results([vec![rates]])
            .into_connection();

        let target: Period = "2026-06".parse().unwrap();
        let outcome = recalculate_period(&db, target, None).await.expect("recalculation failed");

        assert_eq!(outcome.updated, 0);
        assert!(outcome.errors.is_empty());
    }
}
