use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{prelude::*, rate_config};
use crate::error::AppError;
use crate::service::compensation;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(list_configs)
        .service(get_active)
        .service(create_config);
}

#[get("")]
async fn list_configs(db: web::Data<DatabaseConnection>) -> Result<impl Responder, AppError> {
    let configs = RateConfig::find()
        .order_by_desc(rate_config::Column::CreatedAt)
        .all(db.as_ref()).await?;

    Ok(web::Json(configs))
}

#[get("/active")]
async fn get_active(db: web::Data<DatabaseConnection>) -> Result<impl Responder, AppError> {
    let active = compensation::active_config(db.as_ref()).await?;

    Ok(web::Json(active))
}

#[derive(Debug, Serialize, Deserialize)]
struct CreateRateConfig {
    premium_production: i64,
    premium_staff: i64,
    meal_weekday_production: i64,
    meal_weekend_5_10_production: i64,
    meal_weekend_10_20_production: i64,
    meal_weekday_staff: i64,
    meal_weekend_5_10_staff: i64,
    meal_weekend_10_20_staff: i64,
    overtime_rate_production: i64,
    overtime_rate_staff: i64,
}

/// Creates a new configuration and makes it the single active one; the
/// deactivation and insert commit together.
#[post("")]
async fn create_config(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<CreateRateConfig>,
) -> Result<impl Responder, AppError> {
    let payload = payload.into_inner();
    let txn = db.get_ref().begin().await?;

    RateConfig::update_many()
        .col_expr(rate_config::Column::IsActive, Expr::value(false))
        .filter(rate_config::Column::IsActive.eq(true))
        .exec(&txn).await?;

    let now = Local::now().fixed_offset();
    let config = rate_config::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        premium_production: payload.premium_production,
        premium_staff: payload.premium_staff,
        meal_weekday_production: payload.meal_weekday_production,
        meal_weekend_5_10_production: payload.meal_weekend_5_10_production,
        meal_weekend_10_20_production: payload.meal_weekend_10_20_production,
        meal_weekday_staff: payload.meal_weekday_staff,
        meal_weekend_5_10_staff: payload.meal_weekend_5_10_staff,
        meal_weekend_10_20_staff: payload.meal_weekend_10_20_staff,
        overtime_rate_production: payload.overtime_rate_production,
        overtime_rate_staff: payload.overtime_rate_staff,
        is_active: true,
    };

    RateConfig::insert(rate_config::ActiveModel {
        id: Set(config.id),
        created_at: Set(config.created_at),
        updated_at: Set(config.updated_at),
        premium_production: Set(config.premium_production),
        premium_staff: Set(config.premium_staff),
        meal_weekday_production: Set(config.meal_weekday_production),
        meal_weekend_5_10_production: Set(config.meal_weekend_5_10_production),
        meal_weekend_10_20_production: Set(config.meal_weekend_10_20_production),
        meal_weekday_staff: Set(config.meal_weekday_staff),
        meal_weekend_5_10_staff: Set(config.meal_weekend_5_10_staff),
        meal_weekend_10_20_staff: Set(config.meal_weekend_10_20_staff),
        overtime_rate_production: Set(config.overtime_rate_production),
        overtime_rate_staff: Set(config.overtime_rate_staff),
        is_active: Set(config.is_active),
    }).exec_without_returning(&txn).await?;

    txn.commit().await?;

    Ok(HttpResponse::Created().json(config))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[actix_web::test]
    async fn test_create_config_activates_new_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .into_connection();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(web::scope("/rates").service(create_config))
        ).await;

        let payload = CreateRateConfig {
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
        };

        let req = test::TestRequest::post()
            .uri("/rates")
            .set_json(&payload)
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: rate_config::Model = test::read_body_json(response).await;
        assert!(created.is_active);
        assert_eq!(created.overtime_rate_production, 50_000);
    }
}
