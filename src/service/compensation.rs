use chrono::{DateTime, FixedOffset, Timelike as _};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::consts::MEAL_CUTOFF_HOUR;
use crate::entity::{prelude::*, rate_config, sea_orm_active_enums::{DayType, EmployeeRole}};
use crate::error::AppError;

/// Supplemental pay for a single attendance day, in whole rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupplementalPay {
    pub overtime_pay: i64,
    pub premium: i64,
    pub meal_allowance: i64,
    pub total: i64,
}

impl SupplementalPay {
    pub const ZERO: Self = Self {
        overtime_pay: 0,
        premium: 0,
        meal_allowance: 0,
        total: 0,
    };
}

/// The currently active rate configuration. Read fresh on every invocation;
/// the single-active invariant is maintained by the activation endpoint.
pub async fn active_config<C: ConnectionTrait>(db: &C) -> Result<rate_config::Model, AppError> {
    RateConfig::find()
        .filter(rate_config::Column::IsActive.eq(true))
        .one(db).await?
        .ok_or(AppError::NotFound("active rate config"))
}

pub fn supplemental_pay(
    role: &EmployeeRole,
    day_type: &DayType,
    overtime_hours: f64,
    clock_out: &DateTime<FixedOffset>,
    premium_eligible: bool,
    rates: &rate_config::Model,
) -> SupplementalPay {
    let overtime_pay = overtime_pay(role, day_type, overtime_hours, rates);
    let premium = if premium_eligible { premium_amount(role, rates) } else { 0 };
    let meal_allowance = meal_allowance(role, day_type, overtime_hours, clock_out, rates);

    SupplementalPay {
        overtime_pay,
        premium,
        meal_allowance,
        total: overtime_pay + premium + meal_allowance,
    }
}

fn overtime_pay(role: &EmployeeRole, day_type: &DayType, hours: f64, rates: &rate_config::Model) -> i64 {
    if hours <= 0.0 {
        return 0;
    }

    let hourly_rate = match role {
        EmployeeRole::Production => rates.overtime_rate_production,
        EmployeeRole::Staff => rates.overtime_rate_staff,
    };

    let multiplier = match day_type {
        DayType::Weekday => 1.0,
        DayType::Weekend | DayType::PublicHoliday => 2.0,
    };

    (hours * hourly_rate as f64 * multiplier).round() as i64
}

fn premium_amount(role: &EmployeeRole, rates: &rate_config::Model) -> i64 {
    match role {
        EmployeeRole::Production => rates.premium_production,
        EmployeeRole::Staff => rates.premium_staff,
    }
}

fn meal_allowance(
    role: &EmployeeRole,
    day_type: &DayType,
    overtime_hours: f64,
    clock_out: &DateTime<FixedOffset>,
    rates: &rate_config::Model,
) -> i64 {
    match day_type {
        DayType::Weekday => {
            if clock_out.hour() >= MEAL_CUTOFF_HOUR {
                match role {
                    EmployeeRole::Production => rates.meal_weekday_production,
                    EmployeeRole::Staff => rates.meal_weekday_staff,
                }
            } else {
                0
            }
        }
        // Band boundaries are inclusive at 5 and 20; 10 belongs to the lower band.
        DayType::Weekend | DayType::PublicHoliday => {
            if overtime_hours >= 5.0 && overtime_hours <= 10.0 {
                match role {
                    EmployeeRole::Production => rates.meal_weekend_5_10_production,
                    EmployeeRole::Staff => rates.meal_weekend_5_10_staff,
                }
            } else if overtime_hours > 10.0 && overtime_hours <= 20.0 {
                match role {
                    EmployeeRole::Production => rates.meal_weekend_10_20_production,
                    EmployeeRole::Staff => rates.meal_weekend_10_20_staff,
                }
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone as _};
    use uuid::Uuid;

    use super::*;

    fn rates() -> rate_config::Model {
        rate_config::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
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
            is_active: true,
        }
    }

    fn clock_out(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        Local.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap().fixed_offset()
    }

    #[test]
    fn test_no_overtime_pay_for_zero_hours() {
        for day_type in [DayType::Weekday, DayType::Weekend, DayType::PublicHoliday] {
            for role in [EmployeeRole::Production, EmployeeRole::Staff] {
                let pay = supplemental_pay(&role, &day_type, 0.0, &clock_out(17, 0), false, &rates());
                assert_eq!(pay.overtime_pay, 0);
            }
        }
    }

    #[test]
    fn test_weekend_overtime_doubles_weekday_rate() {
        let weekday = supplemental_pay(&EmployeeRole::Staff, &DayType::Weekday, 4.0, &clock_out(13, 0), false, &rates());
        let weekend = supplemental_pay(&EmployeeRole::Staff, &DayType::Weekend, 4.0, &clock_out(13, 0), false, &rates());
        let holiday = supplemental_pay(&EmployeeRole::Staff, &DayType::PublicHoliday, 4.0, &clock_out(13, 0), false, &rates());

        assert_eq!(weekday.overtime_pay, 160_000);
        assert_eq!(weekend.overtime_pay, 2 * weekday.overtime_pay);
        assert_eq!(holiday.overtime_pay, 2 * weekday.overtime_pay);
    }

    #[test]
    fn test_weekday_meal_allowance_cutoff_is_inclusive() {
        let before = supplemental_pay(&EmployeeRole::Production, &DayType::Weekday, 0.0, &clock_out(18, 59), false, &rates());
        assert_eq!(before.meal_allowance, 0);

        let exactly = supplemental_pay(&EmployeeRole::Production, &DayType::Weekday, 0.0, &clock_out(19, 0), false, &rates());
        assert_eq!(exactly.meal_allowance, 15_000);

        let after = supplemental_pay(&EmployeeRole::Production, &DayType::Weekday, 0.0, &clock_out(21, 30), false, &rates());
        assert_eq!(after.meal_allowance, 15_000);
    }

    #[test]
    fn test_weekend_meal_allowance_bands() {
        let meal = |hours: f64| {
            supplemental_pay(&EmployeeRole::Production, &DayType::Weekend, hours, &clock_out(20, 0), false, &rates())
                .meal_allowance
        };

        assert_eq!(meal(4.9), 0);
        assert_eq!(meal(5.0), 20_000);
        assert_eq!(meal(10.0), 20_000);
        assert_eq!(meal(10.0001), 25_000);
        assert_eq!(meal(20.0), 25_000);
        assert_eq!(meal(21.0), 0);
    }

    #[test]
    fn test_premium_requires_eligibility() {
        for role in [EmployeeRole::Production, EmployeeRole::Staff] {
            let ineligible = supplemental_pay(&role, &DayType::Weekday, 0.0, &clock_out(17, 0), false, &rates());
            assert_eq!(ineligible.premium, 0);
        }

        let production = supplemental_pay(&EmployeeRole::Production, &DayType::Weekday, 0.0, &clock_out(17, 0), true, &rates());
        assert_eq!(production.premium, 100_000);

        let staff = supplemental_pay(&EmployeeRole::Staff, &DayType::Weekday, 0.0, &clock_out(17, 0), true, &rates());
        assert_eq!(staff.premium, 75_000);
    }

    #[test]
    fn test_production_weekday_scenario() {
        let pay = supplemental_pay(&EmployeeRole::Production, &DayType::Weekday, 3.0, &clock_out(19, 30), true, &rates());

        assert_eq!(pay.overtime_pay, 150_000);
        assert_eq!(pay.premium, 100_000);
        assert_eq!(pay.meal_allowance, 15_000);
        assert_eq!(pay.total, 265_000);
    }

    #[test]
    fn test_production_weekend_scenario() {
        let pay = supplemental_pay(&EmployeeRole::Production, &DayType::Weekend, 6.0, &clock_out(14, 0), false, &rates());

        assert_eq!(pay.overtime_pay, 600_000);
        assert_eq!(pay.premium, 0);
        assert_eq!(pay.meal_allowance, 20_000);
        assert_eq!(pay.total, 620_000);
    }

    #[test]
    fn test_identical_inputs_round_trip() {
        let first = supplemental_pay(&EmployeeRole::Staff, &DayType::PublicHoliday, 7.5, &clock_out(16, 30), true, &rates());
        let second = supplemental_pay(&EmployeeRole::Staff, &DayType::PublicHoliday, 7.5, &clock_out(16, 30), true, &rates());

        assert_eq!(first, second);
        assert_eq!(first.total, first.overtime_pay + first.premium + first.meal_allowance);
    }
}
