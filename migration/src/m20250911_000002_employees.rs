use sea_orm_migration::prelude::*;

use crate::m20250911_000001_users_and_roles::SystemUsers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    EmployeeId,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Department,
    Position,
    Salary,
    HireDate,
    PerformanceReview,
    Skills,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::EmployeeId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Employees::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string_len(75)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::PhoneNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Department).string_len(50).not_null())
                    .col(ColumnDef::new(Employees::Position).string_len(50).not_null())
                    .col(ColumnDef::new(Employees::Salary).big_integer().not_null())
                    .col(ColumnDef::new(Employees::HireDate).date().not_null())
                    .col(ColumnDef::new(Employees::PerformanceReview).text())
                    .col(ColumnDef::new(Employees::Skills).text())
                    .col(
                        ColumnDef::new(Employees::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_system_user")
                            .from(Employees::Table, Employees::EmployeeId)
                            .to(SystemUsers::Table, SystemUsers::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_employees_department", Employees::Department),
            ("idx_employees_position", Employees::Position),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Employees::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await
    }
}
