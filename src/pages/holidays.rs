use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{holiday, prelude::*, sea_orm_active_enums::HolidayKind};
use crate::error::AppError;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_holidays)
        .service(upsert_holiday);
}

#[derive(Debug, Deserialize)]
struct HolidayQuery {
    year: Option<i32>,
}

#[get("")]
async fn list_holidays(
    db: web::Data<DatabaseConnection>,
    query: web::Query<HolidayQuery>,
) -> Result<impl Responder, AppError> {
    let mut find = Holiday::find().order_by_asc(holiday::Column::Date);

    if let Some(year) = query.year {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::Validation(format!("invalid year {year}")))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::Validation(format!("invalid year {year}")))?;

        find = find.filter(holiday::Column::Date.between(first, last));
    }

    Ok(web::Json(find.all(db.as_ref()).await?))
}

#[derive(Debug, Serialize, Deserialize)]
struct UpsertHoliday {
    date: NaiveDate,
    label: String,
    kind: HolidayKind,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Registry maintenance; re-posting a date updates the existing entry.
#[post("")]
async fn upsert_holiday(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<UpsertHoliday>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let now = Local::now().fixed_offset();

    let entry = holiday::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        date: payload.date,
        label: payload.label,
        kind: payload.kind,
        is_active: payload.is_active,
    };

    Holiday::insert(holiday::ActiveModel {
        id: Set(entry.id),
        created_at: Set(entry.created_at),
        updated_at: Set(entry.updated_at),
        date: Set(entry.date),
        label: Set(entry.label.clone()),
        kind: Set(entry.kind.clone()),
        is_active: Set(entry.is_active),
    })
    .on_conflict(
        OnConflict::column(holiday::Column::Date)
            .update_columns([
                holiday::Column::Label,
                holiday::Column::Kind,
                holiday::Column::IsActive,
                holiday::Column::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_without_returning(db.as_ref()).await?;

    Ok(HttpResponse::Created().json(entry))
}
