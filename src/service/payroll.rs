use chrono::{Local, NaiveDate};
use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::consts::SOCIAL_INSURANCE_MONTHLY;
use crate::entity::{daily_attendance, employee, payroll_item, payroll_period, payroll_run, prelude::*, sea_orm_active_enums::{LineCategory, PayCategory, PeriodType}};
use crate::error::AppError;
use crate::service::period;
use crate::utils;

#[derive(Debug, Serialize)]
pub struct PayrollBreakdown {
    pub run: payroll_run::Model,
    pub items: Vec<payroll_item::Model>,
}

pub async fn generate_for_period<C>(
    db: &C,
    employee_id: Uuid,
    payroll_period: &payroll_period::Model,
) -> Result<PayrollBreakdown, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if payroll_period.is_closed {
        return Err(AppError::PeriodClosed);
    }

    generate_for_range(
        db,
        employee_id,
        payroll_period.start_date,
        payroll_period.end_date,
        payroll_period.period_type.clone(),
        Some(payroll_period.id),
    ).await
}

/// Generates one payroll run for an employee and date range. Regeneration
/// for the same range replaces the previous run instead of duplicating it.
pub async fn generate_for_range<C>(
    db: &C,
    employee_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
    period_type: PeriodType,
    period_id: Option<Uuid>,
) -> Result<PayrollBreakdown, AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if end < start {
        return Err(AppError::Validation("period end precedes period start".to_string()));
    }

    let txn = db.begin().await?;

    let employee = Employee::find_by_id(employee_id)
        .one(&txn).await?
        .ok_or(AppError::NotFound("employee"))?;

    PayrollRun::delete_many()
        .filter(payroll_run::Column::EmployeeId.eq(employee_id))
        .filter(payroll_run::Column::PeriodStart.eq(start))
        .filter(payroll_run::Column::PeriodEnd.eq(end))
        .exec(&txn).await?;

    let attendance = DailyAttendance::find()
        .filter(daily_attendance::Column::EmployeeId.eq(employee_id))
        .filter(daily_attendance::Column::Date.between(start, end))
        .all(&txn).await?;

    let base = base_pay(&employee, &attendance, start, end);
    let supplemental = aggregate_supplemental(&attendance);
    let deduction = social_insurance_deduction(start, end);
    let lines = build_lines(base, &supplemental, deduction);

    let net_amount = lines.iter().map(|(category, _, amount)| match category {
        LineCategory::Income => *amount,
        LineCategory::Deduction => -*amount,
    }).sum();

    let now = Local::now().fixed_offset();
    let run_id = Uuid::new_v4();

    let run = payroll_run::Model {
        id: run_id,
        created_at: now,
        updated_at: now,
        employee_id,
        period_label: period_label(start, end, &period_type),
        period_type,
        period_start: start,
        period_end: end,
        period_id,
        net_amount,
        payment_date: None,
    };

    PayrollRun::insert(payroll_run::ActiveModel {
        id: Set(run.id),
        created_at: Set(run.created_at),
        updated_at: Set(run.updated_at),
        employee_id: Set(run.employee_id),
        period_label: Set(run.period_label.clone()),
        period_type: Set(run.period_type.clone()),
        period_start: Set(run.period_start),
        period_end: Set(run.period_end),
        period_id: Set(run.period_id),
        net_amount: Set(run.net_amount),
        payment_date: Set(run.payment_date),
    }).exec_without_returning(&txn).await?;

    let items: Vec<payroll_item::Model> = lines.into_iter().map(|(category, label, amount)| payroll_item::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        run_id,
        category,
        label: label.to_string(),
        amount,
    }).collect();

    if !items.is_empty() {
        PayrollItem::insert_many(items.iter().map(|item| payroll_item::ActiveModel {
            id: Set(item.id),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
            run_id: Set(item.run_id),
            category: Set(item.category.clone()),
            label: Set(item.label.clone()),
            amount: Set(item.amount),
        })).exec_without_returning(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(
        employee = %employee.full_name,
        %start,
        %end,
        net_amount,
        "generated payroll run"
    );

    Ok(PayrollBreakdown { run, items })
}

/// Base pay by pay category. Monthly salaries are paid in full only for an
/// exact calendar month and prorated linearly otherwise; daily rates follow
/// the qualifying attendance count; piecework is settled outside the engine.
pub(crate) fn base_pay(
    employee: &employee::Model,
    attendance: &[daily_attendance::Model],
    start: NaiveDate,
    end: NaiveDate,
) -> i64 {
    match employee.pay_category {
        PayCategory::Monthly => {
            let salary = employee.monthly_salary.unwrap_or(0);

            if utils::is_full_calendar_month(start, end) {
                salary
            } else {
                salary * utils::day_count(start, end) / utils::days_in_month(start)
            }
        }
        PayCategory::Daily => {
            period::qualifying_days(attendance) as i64 * employee.daily_rate.unwrap_or(0)
        }
        PayCategory::Piecework => 0,
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SupplementalTotals {
    pub overtime_pay: i64,
    pub premium: i64,
    pub meal_allowance: i64,
}

pub(crate) fn aggregate_supplemental(rows: &[daily_attendance::Model]) -> SupplementalTotals {
    rows.iter().fold(SupplementalTotals::default(), |mut totals, row| {
        totals.overtime_pay += row.overtime_pay;
        totals.premium += row.premium;
        totals.meal_allowance += row.meal_allowance;
        totals
    })
}

pub(crate) fn social_insurance_deduction(start: NaiveDate, end: NaiveDate) -> i64 {
    if utils::is_full_calendar_month(start, end) {
        SOCIAL_INSURANCE_MONTHLY
    } else {
        SOCIAL_INSURANCE_MONTHLY * utils::day_count(start, end) / utils::days_in_month(start)
    }
}

pub(crate) fn build_lines(
    base_pay: i64,
    supplemental: &SupplementalTotals,
    deduction: i64,
) -> Vec<(LineCategory, &'static str, i64)> {
    let incomes = [
        ("Base Pay", base_pay),
        ("Overtime Pay", supplemental.overtime_pay),
        ("Attendance Premium", supplemental.premium),
        ("Meal Allowance", supplemental.meal_allowance),
    ];

    let mut lines: Vec<(LineCategory, &'static str, i64)> = incomes.into_iter()
        .filter(|(_, amount)| *amount > 0)
        .map(|(label, amount)| (LineCategory::Income, label, amount))
        .collect();

    if deduction > 0 {
        lines.push((LineCategory::Deduction, "Social Insurance", deduction));
    }

    lines
}

pub(crate) fn period_label(start: NaiveDate, end: NaiveDate, period_type: &PeriodType) -> String {
    match period_type {
        PeriodType::Daily => start.format("%d %b %Y").to_string(),
        PeriodType::Weekly => format!("{} - {}", start.format("%d %b"), end.format("%d %b %Y")),
        PeriodType::Monthly => start.format("%B %Y").to_string(),
    }
}
