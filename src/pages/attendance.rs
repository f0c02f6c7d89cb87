use actix_web::{get, post, put, web, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{daily_attendance, prelude::*};
use crate::error::AppError;
use crate::service::{recalc, reconcile};

use model::*;

mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(process_scans)
        .service(recalculate)
        .service(list_attendance)
        .service(override_attendance);
}

/// Manual trigger for the scan reconciler; the scheduled job calls the same
/// service and both are safe to overlap.
#[post("/process")]
async fn process_scans(db: web::Data<DatabaseConnection>) -> Result<impl Responder, AppError> {
    let outcome = reconcile::process_unprocessed_scans(db.as_ref()).await?;

    Ok(web::Json(outcome))
}

/// Re-runs the rule engine over a period after a config or data correction.
#[post("/recalculate")]
async fn recalculate(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<RecalculateRequest>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let period = payload.period.parse()?;

    let outcome = recalc::recalculate_period(db.as_ref(), period, payload.employee_id).await?;

    Ok(web::Json(outcome))
}

#[get("")]
async fn list_attendance(
    db: web::Data<DatabaseConnection>,
    query: web::Query<AttendanceQuery>,
) -> Result<impl Responder, AppError> {
    let mut find = DailyAttendance::find()
        .filter(daily_attendance::Column::Date.between(query.from, query.to))
        .order_by_asc(daily_attendance::Column::Date);

    if let Some(employee_id) = query.employee_id {
        find = find.filter(daily_attendance::Column::EmployeeId.eq(employee_id));
    }

    Ok(web::Json(find.all(db.as_ref()).await?))
}

/// Administrative override. The submitted values are authoritative as-is;
/// nothing is recomputed until the next reconciliation touches the day.
#[put("/{attendance_id}")]
async fn override_attendance(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    payload: web::Json<OverrideAttendance>,
) -> Result<impl Responder, AppError> {
    let attendance_id = path.into_inner();

    let current = DailyAttendance::find_by_id(attendance_id)
        .one(db.as_ref()).await?
        .ok_or(AppError::NotFound("attendance"))?;

    let payload = payload.into_inner();

    let updated = daily_attendance::Model {
        updated_at: Local::now().fixed_offset(),
        clock_in: payload.clock_in.or(current.clock_in),
        clock_out: payload.clock_out.or(current.clock_out),
        status: payload.status.unwrap_or(current.status),
        day_type: payload.day_type.unwrap_or(current.day_type),
        overtime_hours: payload.overtime_hours.unwrap_or(current.overtime_hours),
        premium_eligible: payload.premium_eligible.unwrap_or(current.premium_eligible),
        overtime_pay: payload.overtime_pay.unwrap_or(current.overtime_pay),
        premium: payload.premium.unwrap_or(current.premium),
        meal_allowance: payload.meal_allowance.unwrap_or(current.meal_allowance),
        total_supplemental: payload.total_supplemental.unwrap_or(current.total_supplemental),
        ..current
    };

    DailyAttendance::update_many()
        .set(daily_attendance::ActiveModel {
            updated_at: Set(updated.updated_at),
            clock_in: Set(updated.clock_in),
            clock_out: Set(updated.clock_out),
            status: Set(updated.status.clone()),
            day_type: Set(updated.day_type.clone()),
            overtime_hours: Set(updated.overtime_hours),
            premium_eligible: Set(updated.premium_eligible),
            overtime_pay: Set(updated.overtime_pay),
            premium: Set(updated.premium),
            meal_allowance: Set(updated.meal_allowance),
            total_supplemental: Set(updated.total_supplemental),
            ..Default::default()
        })
        .filter(daily_attendance::Column::Id.eq(attendance_id))
        .exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}
