use chrono::NaiveDate;

use sea_orm::prelude::DateTimeWithTimeZone;

use super::*;

use crate::entity::sea_orm_active_enums::{AttendanceStatus, DayType};

#[derive(Debug, Deserialize)]
pub(super) struct AttendanceQuery {
    pub(super) employee_id: Option<Uuid>,
    pub(super) from: NaiveDate,
    pub(super) to: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct RecalculateRequest {
    pub(super) period: String,
    pub(super) employee_id: Option<Uuid>,
}

/// Partial override; absent fields keep their stored values.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct OverrideAttendance {
    pub(super) clock_in: Option<DateTimeWithTimeZone>,
    pub(super) clock_out: Option<DateTimeWithTimeZone>,
    pub(super) status: Option<AttendanceStatus>,
    pub(super) day_type: Option<DayType>,
    pub(super) overtime_hours: Option<f64>,
    pub(super) premium_eligible: Option<bool>,
    pub(super) overtime_pay: Option<i64>,
    pub(super) premium: Option<i64>,
    pub(super) meal_allowance: Option<i64>,
    pub(super) total_supplemental: Option<i64>,
}
