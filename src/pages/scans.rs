use actix_web::{post, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::device::DeviceClient;
use crate::error::AppError;
use crate::service::ingest::{self, IncomingScan};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(ingest_bulk)
        .service(sync_from_device);
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    inserted: u64,
}

/// Webhook / bulk entry point for raw scans.
#[post("")]
async fn ingest_bulk(
    db: web::Data<DatabaseConnection>,
    payload: web::Json<Vec<IncomingScan>>,
) -> Result<impl Responder, AppError> {
    let inserted = ingest::ingest_scans(db.as_ref(), payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(IngestResponse { inserted }))
}

#[derive(Debug, Deserialize)]
struct SyncRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

/// Pulls scans from the device cloud API for a date range (default today).
#[post("/sync")]
async fn sync_from_device(
    db: web::Data<DatabaseConnection>,
    device: web::Data<Option<DeviceClient>>,
    query: web::Query<SyncRange>,
) -> Result<impl Responder, AppError> {
    let Some(client) = device.get_ref().as_ref() else {
        return Err(AppError::Validation("no device api configured".to_string()));
    };

    let today = Local::now().date_naive();
    let start = query.start.unwrap_or(today);
    let end = query.end.unwrap_or(today);

    let scans = client.fetch_attlog(start, end).await?;
    let inserted = ingest::ingest_scans(db.as_ref(), scans).await?;

    Ok(web::Json(IngestResponse { inserted }))
}
