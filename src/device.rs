use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone as _};
use serde::{Deserialize, Serialize};

use crate::config::DeviceApiConfig;
use crate::entity::sea_orm_active_enums::ScanDirection;
use crate::error::AppError;
use crate::service::ingest::IncomingScan;

/// Client for the fingerprint-device cloud API.
#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct AttlogRequest {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AttlogRecord {
    pub sn: String,
    pub pin: String,
    pub scan_date: String,
    pub verify_mode: i16,
    pub inout_mode: i16,
}

#[derive(Debug, Deserialize)]
struct AttlogResponse {
    data: Vec<AttlogRecord>,
}

impl DeviceClient {
    pub fn new(config: DeviceApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }

    pub async fn fetch_attlog(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<IncomingScan>, AppError> {
        let response = self.http
            .post(format!("{}/get_attlog", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&AttlogRequest { start_date: start, end_date: end })
            .send().await
            .map_err(|err| AppError::DeviceApi(err.to_string()))?
            .error_for_status()
            .map_err(|err| AppError::DeviceApi(err.to_string()))?;

        let body: AttlogResponse = response.json().await
            .map_err(|err| AppError::DeviceApi(err.to_string()))?;

        body.data.into_iter().map(parse_record).collect()
    }
}

/// Device timestamps arrive as naive local wall time, e.g. `2026-06-01 07:59:01`.
pub(crate) fn parse_record(record: AttlogRecord) -> Result<IncomingScan, AppError> {
    let naive = NaiveDateTime::parse_from_str(&record.scan_date, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| AppError::Validation(format!("invalid scan_date `{}`", record.scan_date)))?;

    let offset = *Local::now().offset();
    let scanned_at: DateTime<FixedOffset> = offset.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::Validation(format!("ambiguous scan_date `{}`", record.scan_date)))?;

    Ok(IncomingScan {
        device_sn: record.sn,
        badge_number: record.pin,
        scanned_at,
        verify_mode: record.verify_mode,
        direction: if record.inout_mode == 2 { ScanDirection::Out } else { ScanDirection::In },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let record = AttlogRecord {
            sn: "FIO-1".to_string(),
            pin: "1001".to_string(),
            scan_date: "2026-06-01 07:59:01".to_string(),
            verify_mode: 1,
            inout_mode: 2,
        };

        let scan = parse_record(record).expect("parse failed");

        assert_eq!(scan.device_sn, "FIO-1");
        assert_eq!(scan.badge_number, "1001");
        assert_eq!(scan.scanned_at.date_naive(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(scan.direction, ScanDirection::Out);
    }

    #[test]
    fn test_parse_record_rejects_malformed_timestamp() {
        let record = AttlogRecord {
            sn: "FIO-1".to_string(),
            pin: "1001".to_string(),
            scan_date: "junk".to_string(),
            verify_mode: 1,
            inout_mode: 1,
        };

        assert!(matches!(parse_record(record), Err(AppError::Validation(_))));
    }
}
