use sea_orm_migration::{prelude::*, sea_orm::ActiveEnum};

use crate::m20260110_000001_init::{Holiday, HolidayKind, RateConfig};
use crate::util::DefaultColumn;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seeds the initial active rate configuration and the national red-letter
/// days, so a fresh database can reconcile scans without manual setup.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(Query::insert()
            .into_table(RateConfig::Table)
            .columns([
                DefaultColumn::CreatedAt.into_iden(),
                DefaultColumn::UpdatedAt.into_iden(),
                RateConfig::PremiumProduction.into_iden(),
                RateConfig::PremiumStaff.into_iden(),
                RateConfig::MealWeekdayProduction.into_iden(),
                RateConfig::MealWeekend510Production.into_iden(),
                RateConfig::MealWeekend1020Production.into_iden(),
                RateConfig::MealWeekdayStaff.into_iden(),
                RateConfig::MealWeekend510Staff.into_iden(),
                RateConfig::MealWeekend1020Staff.into_iden(),
                RateConfig::OvertimeRateProduction.into_iden(),
                RateConfig::OvertimeRateStaff.into_iden(),
                RateConfig::IsActive.into_iden(),
            ])
            .values_panic([
                Expr::current_timestamp().into(),
                Expr::current_timestamp().into(),
                Expr::val(100_000i64).into(),
                Expr::val(75_000i64).into(),
                Expr::val(15_000i64).into(),
                Expr::val(20_000i64).into(),
                Expr::val(25_000i64).into(),
                Expr::val(12_000i64).into(),
                Expr::val(17_000i64).into(),
                Expr::val(22_000i64).into(),
                Expr::val(50_000i64).into(),
                Expr::val(40_000i64).into(),
                Expr::val(true).into(),
            ])
            .take()
        ).await?;

        let holidays = [
            ("2026-01-01", "Tahun Baru"),
            ("2026-03-21", "Idul Fitri"),
            ("2026-03-22", "Idul Fitri"),
            ("2026-05-01", "Hari Buruh"),
            ("2026-08-17", "Hari Kemerdekaan"),
            ("2026-12-25", "Natal"),
        ];

        for (date, label) in holidays {
            manager.exec_stmt(Query::insert()
                .into_table(Holiday::Table)
                .columns([
                    DefaultColumn::CreatedAt.into_iden(),
                    DefaultColumn::UpdatedAt.into_iden(),
                    Holiday::Date.into_iden(),
                    Holiday::Label.into_iden(),
                    Holiday::Kind.into_iden(),
                    Holiday::IsActive.into_iden(),
                ])
                .values_panic([
                    Expr::current_timestamp().into(),
                    Expr::current_timestamp().into(),
                    Expr::val(date).cast_as(Alias::new("date")),
                    Expr::val(label).into(),
                    Expr::val("red_letter").as_enum(HolidayKind::name()),
                    Expr::val(true).into(),
                ])
                .take()
            ).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(Query::delete().from_table(Holiday::Table).take()).await?;
        manager.exec_stmt(Query::delete().from_table(RateConfig::Table).take()).await?;

        Ok(())
    }
}
