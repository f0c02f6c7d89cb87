use chrono::{DateTime, FixedOffset, Local};
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, sea_query::OnConflict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{prelude::*, scan_event, sea_orm_active_enums::ScanDirection};
use crate::error::AppError;

/// One raw scan as delivered by a device webhook or the cloud API pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingScan {
    pub device_sn: String,
    pub badge_number: String,
    pub scanned_at: DateTime<FixedOffset>,
    pub verify_mode: i16,
    pub direction: ScanDirection,
}

/// Stores raw scans for later reconciliation. The (device, timestamp, badge)
/// identity makes repeated pulls and webhook retries idempotent.
pub async fn ingest_scans<C: ConnectionTrait>(
    db: &C,
    scans: Vec<IncomingScan>,
) -> Result<u64, AppError> {
    if scans.is_empty() {
        return Ok(0);
    }

    let now = Local::now().fixed_offset();

    let rows = scans.into_iter().map(|scan| scan_event::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        device_sn: Set(scan.device_sn),
        badge_number: Set(scan.badge_number),
        scanned_at: Set(scan.scanned_at),
        verify_mode: Set(scan.verify_mode),
        direction: Set(scan.direction),
        is_processed: Set(false),
        processed_at: Set(None),
    });

    let inserted = ScanEvent::insert_many(rows)
        .on_conflict(
            OnConflict::columns([
                scan_event::Column::DeviceSn,
                scan_event::Column::ScannedAt,
                scan_event::Column::BadgeNumber,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db).await?;

    tracing::info!(inserted, "ingested scan events");

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[actix_web::test]
    async fn test_ingest_inserts_batch() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 2 },
            ])
            .into_connection();

        let scans = vec![
            IncomingScan {
                device_sn: "FIO-1".to_string(),
                badge_number: "1001".to_string(),
                scanned_at: Local.with_ymd_and_hms(2026, 6, 1, 7, 55, 0).unwrap().fixed_offset(),
                verify_mode: 1,
                direction: ScanDirection::In,
            },
            IncomingScan {
                device_sn: "FIO-1".to_string(),
                badge_number: "1001".to_string(),
                scanned_at: Local.with_ymd_and_hms(2026, 6, 1, 17, 5, 0).unwrap().fixed_offset(),
                verify_mode: 1,
                direction: ScanDirection::Out,
            },
        ];

        let inserted = ingest_scans(&db, scans).await.expect("ingest failed");
        assert_eq!(inserted, 2);
    }

    #[actix_web::test]
    async fn test_ingest_empty_batch_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let inserted = ingest_scans(&db, Vec::new()).await.expect("ingest failed");
        assert_eq!(inserted, 0);
    }
}
