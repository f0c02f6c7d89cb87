/// Tolerance in minutes added to the scheduled clock-in before a day counts as late.
pub const LATE_GRACE_MINUTES: i64 = 30;

/// Normal working day: 8 working hours + 1 hour break.
pub const BASELINE_SHIFT_HOURS: f64 = 9.0;

/// Qualifying attendance days required in a period for the premium.
pub const PREMIUM_THRESHOLD_DAYS: i32 = 6;

/// Weekday meal allowance is paid from this clock-out hour onwards.
pub const MEAL_CUTOFF_HOUR: u32 = 19;

/// Flat monthly social-insurance deduction, rupiah.
pub const SOCIAL_INSURANCE_MONTHLY: i64 = 50_000;
