use std::str::FromStr;

use actix_web::{dev, get, post, web, FromRequest, HttpRequest, HttpResponse, Responder};
use chrono::Local;
use futures_util::future::LocalBoxFuture;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{payroll_item, payroll_period, payroll_run, prelude::*};
use crate::error::AppError;
use crate::service::payroll::{self, PayrollBreakdown};

use extractor::OpenPeriod;
use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(generate)
        .service(create_period)
        .service(generate_for_period)
        .service(close_period)
        .service(list_runs)
        .service(get_run);
}

#[post("/generate")]
async fn generate(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<GeneratePayroll>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();

    let breakdown = payroll::generate_for_range(
        db.as_ref(),
        payload.employee_id,
        payload.start_date,
        payload.end_date,
        payload.period_type,
        None,
    ).await?;

    Ok(HttpResponse::Created().json(breakdown))
}

#[post("/periods")]
async fn create_period(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<CreatePeriod>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();

    if payload.end_date < payload.start_date {
        return Err(AppError::Validation("end_date is lower than start_date".to_string()));
    }

    let now = Local::now().fixed_offset();
    let period = payroll_period::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        name: payload.name,
        period_type: payload.period_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        is_closed: false,
        payment_date: None,
    };

    PayrollPeriod::insert(payroll_period::ActiveModel {
        id: Set(period.id),
        created_at: Set(period.created_at),
        updated_at: Set(period.updated_at),
        name: Set(period.name.clone()),
        period_type: Set(period.period_type.clone()),
        start_date: Set(period.start_date),
        end_date: Set(period.end_date),
        is_closed: Set(period.is_closed),
        payment_date: Set(period.payment_date),
    }).exec_without_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(period))
}

#[post("/periods/{period_id}/generate")]
async fn generate_for_period(
    db: web::Data<DatabaseConnection>,
    period: OpenPeriod,
    payload: web::Json<GenerateForPeriod>,
) -> Result<impl Responder, AppError> {
    let breakdown = payroll::generate_for_period(db.as_ref(), payload.employee_id, &period).await?;

    Ok(HttpResponse::Created().json(breakdown))
}

/// Closing a period locks it against further payroll generation.
#[post("/periods/{period_id}/close")]
async fn close_period(
    db: web::Data<DatabaseConnection>,
    period: payroll_period::Model,
) -> Result<impl Responder, AppError> {
    let updated = payroll_period::Model {
        updated_at: Local::now().fixed_offset(),
        is_closed: true,
        payment_date: period.payment_date.or_else(|| Some(Local::now().date_naive())),
        ..period
    };

    PayrollPeriod::update_many()
        .set(payroll_period::ActiveModel {
            updated_at: Set(updated.updated_at),
            is_closed: Set(updated.is_closed),
            payment_date: Set(updated.payment_date),
            ..Default::default()
        })
        .filter(payroll_period::Column::Id.eq(updated.id))
        .exec(db.as_ref()).await?;

    Ok(web::Json(updated))
}

#[get("/runs")]
async fn list_runs(
    db: web::Data<DatabaseConnection>,
    query: web::Query<RunsQuery>,
) -> Result<impl Responder, AppError> {
    let mut find = PayrollRun::find()
        .order_by_desc(payroll_run::Column::PeriodStart);

    if let Some(employee_id) = query.employee_id {
        find = find.filter(payroll_run::Column::EmployeeId.eq(employee_id));
    }

    if let Some(from) = query.from {
        find = find.filter(payroll_run::Column::PeriodStart.gte(from));
    }

    if let Some(to) = query.to {
        find = find.filter(payroll_run::Column::PeriodEnd.lte(to));
    }

    Ok(web::Json(find.all(db.as_ref()).await?))
}

#[get("/runs/{run_id}")]
async fn get_run(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let run_id = path.into_inner();

    let run = PayrollRun::find_by_id(run_id)
        .one(db.as_ref()).await?
        .ok_or(AppError::NotFound("payroll run"))?;

    let items = PayrollItem::find()
        .filter(payroll_item::Column::RunId.eq(run_id))
        .all(db.as_ref()).await?;

    Ok(web::Json(PayrollBreakdown { run, items }))
}
