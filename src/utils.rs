use chrono::{Datelike as _, Days, NaiveDate};

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let next_month = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap();

    next_month.checked_sub_days(Days::new(1)).unwrap()
}

pub fn days_in_month(date: NaiveDate) -> i64 {
    last_of_month(date).day() as i64
}

/// Inclusive number of days in `[start, end]`.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn is_full_calendar_month(start: NaiveDate, end: NaiveDate) -> bool {
    start == first_of_month(start) && end == last_of_month(start)
}
