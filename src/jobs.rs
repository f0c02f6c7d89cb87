use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike as _, Local, Timelike as _, Weekday};
use sea_orm::DatabaseConnection;

use crate::device::DeviceClient;
use crate::service::{ingest, period::Period, recalc, reconcile};

const SYNC_TICK: Duration = Duration::from_secs(30 * 60);
const RECALC_TICK: Duration = Duration::from_secs(60 * 60);

/// Background triggers. All of them are idempotent and safe to overlap with
/// the manual endpoints: ingestion is conflict-ignored, reconciliation is
/// mark-and-skip, payroll regeneration is delete-and-replace.
pub fn spawn(db: Arc<DatabaseConnection>, device: Option<DeviceClient>) {
    actix_web::rt::spawn(sync_loop(db.clone(), device));
    actix_web::rt::spawn(recalculate_loop(db));
}

/// Device pull plus reconciliation: every 30 minutes during working hours on
/// weekdays, once an hour on weekends.
async fn sync_loop(db: Arc<DatabaseConnection>, device: Option<DeviceClient>) {
    let mut ticker = actix_web::rt::time::interval(SYNC_TICK);

    loop {
        ticker.tick().await;

        let now = Local::now();
        if !sync_due(now.weekday(), now.hour(), now.minute()) {
            continue;
        }

        if let Some(client) = device.as_ref() {
            let today = now.date_naive();

            match client.fetch_attlog(today, today).await {
                Ok(scans) => {
                    if let Err(err) = ingest::ingest_scans(&*db, scans).await {
                        tracing::error!(error = %err, "scheduled scan ingest failed");
                    }
                }
                Err(err) => tracing::error!(error = %err, "scheduled device pull failed"),
            }
        }

        match reconcile::process_unprocessed_scans(&*db).await {
            Ok(outcome) => {
                if !outcome.errors.is_empty() {
                    tracing::warn!(errors = outcome.errors.len(), "scheduled reconciliation finished with errors");
                }
            }
            Err(err) => tracing::error!(error = %err, "scheduled reconciliation failed"),
        }
    }
}

pub(crate) fn sync_due(weekday: Weekday, hour: u32, minute: u32) -> bool {
    match weekday {
        // Weekends sync hourly: only the first tick of each hour fires.
        Weekday::Sat | Weekday::Sun => minute < 30,
        _ => (6..19).contains(&hour),
    }
}

/// Recalculates the previous month's supplemental pay on the 1st at 02:00.
async fn recalculate_loop(db: Arc<DatabaseConnection>) {
    let mut ticker = actix_web::rt::time::interval(RECALC_TICK);

    loop {
        ticker.tick().await;

        let now = Local::now();
        if now.day() != 1 || now.hour() != 2 {
            continue;
        }

        let previous = Period::of(now.date_naive()).previous();

        match recalc::recalculate_period(&*db, previous, None).await {
            Ok(outcome) => tracing::info!(updated = outcome.updated, "monthly recalculation finished"),
            Err(err) => tracing::error!(error = %err, "monthly recalculation failed"),
        }
    }
}
