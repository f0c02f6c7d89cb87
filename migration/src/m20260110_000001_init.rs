use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::util::{default_table_statement, DefaultColumn};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager.create_type(schema.create_enum_from_active_enum::<EmployeeRole>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PayCategory>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<EmployeeStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<ScanDirection>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<AttendanceStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<DayType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PeriodType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LineCategory>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<HolidayKind>()).await?;

        manager
            .create_table(default_table_statement()
                .table(Employee::Table)
                .col(ColumnDef::new(Employee::BadgeNumber)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::FullName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::Role)
                    .custom(EmployeeRole::name())
                    .not_null())
                .col(ColumnDef::new(Employee::PayCategory)
                    .custom(PayCategory::name())
                    .not_null())
                .col(ColumnDef::new(Employee::MonthlySalary)
                    .big_integer())
                .col(ColumnDef::new(Employee::DailyRate)
                    .big_integer())
                .col(ColumnDef::new(Employee::ScheduledIn)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Employee::ScheduledOut)
                    .time()
                    .not_null())
                .col(ColumnDef::new(Employee::UsesShift)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(Employee::Status)
                    .custom(EmployeeStatus::name())
                    .not_null())
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(ScanEvent::Table)
                .col(ColumnDef::new(ScanEvent::DeviceSn)
                    .text()
                    .not_null())
                .col(ColumnDef::new(ScanEvent::BadgeNumber)
                    .text()
                    .not_null())
                .col(ColumnDef::new(ScanEvent::ScannedAt)
                    .timestamp_with_time_zone()
                    .not_null())
                .col(ColumnDef::new(ScanEvent::VerifyMode)
                    .small_integer()
                    .not_null())
                .col(ColumnDef::new(ScanEvent::Direction)
                    .custom(ScanDirection::name())
                    .not_null())
                .col(ColumnDef::new(ScanEvent::IsProcessed)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(ScanEvent::ProcessedAt)
                    .timestamp_with_time_zone())
                .take()
            ).await?;

        manager.create_index(Index::create()
            .name("uniq_scan_event_device_time_badge")
            .table(ScanEvent::Table)
            .col(ScanEvent::DeviceSn)
            .col(ScanEvent::ScannedAt)
            .col(ScanEvent::BadgeNumber)
            .unique()
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("idx_scan_event_is_processed")
            .table(ScanEvent::Table)
            .col(ScanEvent::IsProcessed)
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(DailyAttendance::Table)
                .col(ColumnDef::new(DailyAttendance::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(DailyAttendance::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(DailyAttendance::ClockIn)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(DailyAttendance::ClockOut)
                    .timestamp_with_time_zone())
                .col(ColumnDef::new(DailyAttendance::Status)
                    .custom(AttendanceStatus::name())
                    .not_null())
                .col(ColumnDef::new(DailyAttendance::DayType)
                    .custom(DayType::name())
                    .not_null())
                .col(ColumnDef::new(DailyAttendance::OvertimeHours)
                    .double()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(DailyAttendance::PremiumEligible)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(DailyAttendance::OvertimePay)
                    .big_integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(DailyAttendance::Premium)
                    .big_integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(DailyAttendance::MealAllowance)
                    .big_integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(DailyAttendance::TotalSupplemental)
                    .big_integer()
                    .not_null()
                    .default(0))
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(DailyAttendance::Table, DailyAttendance::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("uniq_daily_attendance_employee_date")
            .table(DailyAttendance::Table)
            .col(DailyAttendance::EmployeeId)
            .col(DailyAttendance::Date)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(PeriodAttendance::Table)
                .col(ColumnDef::new(PeriodAttendance::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PeriodAttendance::Period)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PeriodAttendance::QualifyingDays)
                    .integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(PeriodAttendance::MeetsPremiumThreshold)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PeriodAttendance::Table, PeriodAttendance::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("uniq_period_attendance_employee_period")
            .table(PeriodAttendance::Table)
            .col(PeriodAttendance::EmployeeId)
            .col(PeriodAttendance::Period)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(RateConfig::Table)
                .col(ColumnDef::new(RateConfig::PremiumProduction)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::PremiumStaff)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekdayProduction)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekend510Production)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekend1020Production)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekdayStaff)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekend510Staff)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::MealWeekend1020Staff)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::OvertimeRateProduction)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::OvertimeRateStaff)
                    .big_integer()
                    .not_null())
                .col(ColumnDef::new(RateConfig::IsActive)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(PayrollPeriod::Table)
                .col(ColumnDef::new(PayrollPeriod::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PayrollPeriod::PeriodType)
                    .custom(PeriodType::name())
                    .not_null())
                .col(ColumnDef::new(PayrollPeriod::StartDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(PayrollPeriod::EndDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(PayrollPeriod::IsClosed)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(PayrollPeriod::PaymentDate)
                    .date())
                .take()
            ).await?;

        manager.create_index(Index::create()
            .name("idx_payroll_period_type_start")
            .table(PayrollPeriod::Table)
            .col(PayrollPeriod::PeriodType)
            .col(PayrollPeriod::StartDate)
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(PayrollRun::Table)
                .col(ColumnDef::new(PayrollRun::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PayrollRun::PeriodLabel)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PayrollRun::PeriodType)
                    .custom(PeriodType::name())
                    .not_null())
                .col(ColumnDef::new(PayrollRun::PeriodStart)
                    .date()
                    .not_null())
                .col(ColumnDef::new(PayrollRun::PeriodEnd)
                    .date()
                    .not_null())
                .col(ColumnDef::new(PayrollRun::PeriodId)
                    .uuid())
                .col(ColumnDef::new(PayrollRun::NetAmount)
                    .big_integer()
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(PayrollRun::PaymentDate)
                    .date())
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PayrollRun::Table, PayrollRun::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PayrollRun::Table, PayrollRun::PeriodId)
            .to(PayrollPeriod::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::SetNull)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("uniq_payroll_run_employee_range")
            .table(PayrollRun::Table)
            .col(PayrollRun::EmployeeId)
            .col(PayrollRun::PeriodStart)
            .col(PayrollRun::PeriodEnd)
            .unique()
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(PayrollItem::Table)
                .col(ColumnDef::new(PayrollItem::RunId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Category)
                    .custom(LineCategory::name())
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Label)
                    .text()
                    .not_null())
                .col(ColumnDef::new(PayrollItem::Amount)
                    .big_integer()
                    .not_null())
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(PayrollItem::Table, PayrollItem::RunId)
            .to(PayrollRun::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager
            .create_table(default_table_statement()
                .table(Holiday::Table)
                .col(ColumnDef::new(Holiday::Date)
                    .date()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Holiday::Label)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Holiday::Kind)
                    .custom(HolidayKind::name())
                    .not_null())
                .col(ColumnDef::new(Holiday::IsActive)
                    .boolean()
                    .not_null()
                    .default(true))
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(ShiftSchedule::Table)
                .col(ColumnDef::new(ShiftSchedule::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(ShiftSchedule::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(ShiftSchedule::ScheduledIn)
                    .time()
                    .not_null())
                .col(ColumnDef::new(ShiftSchedule::ScheduledOut)
                    .time()
                    .not_null())
                .col(ColumnDef::new(ShiftSchedule::CrossesMidnight)
                    .boolean()
                    .not_null()
                    .default(false))
                .take()
            ).await?;

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(ShiftSchedule::Table, ShiftSchedule::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager.create_index(Index::create()
            .name("uniq_shift_schedule_employee_date")
            .table(ShiftSchedule::Table)
            .col(ShiftSchedule::EmployeeId)
            .col(ShiftSchedule::Date)
            .unique()
            .take()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(TableDropStatement::new().table(ShiftSchedule::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Holiday::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(PayrollItem::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(PayrollRun::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(PayrollPeriod::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(RateConfig::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(PeriodAttendance::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(DailyAttendance::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(ScanEvent::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Employee::Table).take()).await?;

        manager.drop_type(TypeDropStatement::new().name(HolidayKind::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(LineCategory::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(PeriodType::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(DayType::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(AttendanceStatus::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(ScanDirection::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(EmployeeStatus::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(PayCategory::name()).to_owned()).await?;
        manager.drop_type(TypeDropStatement::new().name(EmployeeRole::name()).to_owned()).await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Employee {
    Table,
    BadgeNumber,
    FullName,
    Role,
    PayCategory,
    MonthlySalary,
    DailyRate,
    ScheduledIn,
    ScheduledOut,
    UsesShift,
    Status,
}

#[derive(Iden)]
pub(crate) enum ScanEvent {
    Table,
    DeviceSn,
    BadgeNumber,
    ScannedAt,
    VerifyMode,
    Direction,
    IsProcessed,
    ProcessedAt,
}

#[derive(Iden)]
pub(crate) enum DailyAttendance {
    Table,
    EmployeeId,
    Date,
    ClockIn,
    ClockOut,
    Status,
    DayType,
    OvertimeHours,
    PremiumEligible,
    OvertimePay,
    Premium,
    MealAllowance,
    TotalSupplemental,
}

#[derive(Iden)]
pub(crate) enum PeriodAttendance {
    Table,
    EmployeeId,
    Period,
    QualifyingDays,
    MeetsPremiumThreshold,
}

#[derive(Iden)]
pub(crate) enum RateConfig {
    Table,
    PremiumProduction,
    PremiumStaff,
    MealWeekdayProduction,
    #[iden = "meal_weekend_5_10_production"]
    MealWeekend510Production,
    #[iden = "meal_weekend_10_20_production"]
    MealWeekend1020Production,
    MealWeekdayStaff,
    #[iden = "meal_weekend_5_10_staff"]
    MealWeekend510Staff,
    #[iden = "meal_weekend_10_20_staff"]
    MealWeekend1020Staff,
    OvertimeRateProduction,
    OvertimeRateStaff,
    IsActive,
}

#[derive(Iden)]
pub(crate) enum PayrollPeriod {
    Table,
    Name,
    PeriodType,
    StartDate,
    EndDate,
    IsClosed,
    PaymentDate,
}

#[derive(Iden)]
pub(crate) enum PayrollRun {
    Table,
    EmployeeId,
    PeriodLabel,
    PeriodType,
    PeriodStart,
    PeriodEnd,
    PeriodId,
    NetAmount,
    PaymentDate,
}

#[derive(Iden)]
pub(crate) enum PayrollItem {
    Table,
    RunId,
    Category,
    Label,
    Amount,
}

#[derive(Iden)]
pub(crate) enum Holiday {
    Table,
    Date,
    Label,
    Kind,
    IsActive,
}

#[derive(Iden)]
pub(crate) enum ShiftSchedule {
    Table,
    EmployeeId,
    Date,
    ScheduledIn,
    ScheduledOut,
    CrossesMidnight,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "employee_role")]
pub(crate) enum EmployeeRole {
    #[sea_orm(string_value = "production")]
    Production,
    #[sea_orm(string_value = "staff")]
    Staff,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pay_category")]
pub(crate) enum PayCategory {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "piecework")]
    Piecework,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "employee_status")]
pub(crate) enum EmployeeStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "resigned")]
    Resigned,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "scan_direction")]
pub(crate) enum ScanDirection {
    #[sea_orm(string_value = "in")]
    In,
    #[sea_orm(string_value = "out")]
    Out,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
pub(crate) enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "leave")]
    Leave,
    #[sea_orm(string_value = "sick_leave")]
    SickLeave,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "holiday")]
    Holiday,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "day_type")]
pub(crate) enum DayType {
    #[sea_orm(string_value = "weekday")]
    Weekday,
    #[sea_orm(string_value = "weekend")]
    Weekend,
    #[sea_orm(string_value = "public_holiday")]
    PublicHoliday,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "period_type")]
pub(crate) enum PeriodType {
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "line_category")]
pub(crate) enum LineCategory {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "deduction")]
    Deduction,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "holiday_kind")]
pub(crate) enum HolidayKind {
    #[sea_orm(string_value = "red_letter")]
    RedLetter,
    #[sea_orm(string_value = "commemorative")]
    Commemorative,
}
