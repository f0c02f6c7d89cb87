use chrono::{Datelike as _, NaiveDate, Weekday};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entity::{holiday, prelude::*, sea_orm_active_enums::{DayType, HolidayKind}};
use crate::error::AppError;

/// An active red-letter registry entry beats the weekend check; a date
/// without a registry entry is the common path, not an error.
pub fn classify(date: NaiveDate, holiday: Option<&holiday::Model>) -> DayType {
    if holiday.is_some_and(|h| h.is_active && h.kind == HolidayKind::RedLetter) {
        return DayType::PublicHoliday;
    }

    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

pub async fn day_type_for<C: ConnectionTrait>(db: &C, date: NaiveDate) -> Result<DayType, AppError> {
    let entry = Holiday::find()
        .filter(holiday::Column::Date.eq(date))
        .filter(holiday::Column::IsActive.eq(true))
        .one(db).await?;

    Ok(classify(date, entry.as_ref()))
}
