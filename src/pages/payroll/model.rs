use chrono::NaiveDate;

use super::*;

use crate::entity::sea_orm_active_enums::PeriodType;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GeneratePayroll {
    pub(super) employee_id: Uuid,
    pub(super) start_date: NaiveDate,
    pub(super) end_date: NaiveDate,
    pub(super) period_type: PeriodType,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct GenerateForPeriod {
    pub(super) employee_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CreatePeriod {
    pub(super) name: String,
    pub(super) period_type: PeriodType,
    pub(super) start_date: NaiveDate,
    pub(super) end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub(super) struct RunsQuery {
    pub(super) employee_id: Option<Uuid>,
    pub(super) from: Option<NaiveDate>,
    pub(super) to: Option<NaiveDate>,
}
