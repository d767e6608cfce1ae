use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub(crate) enum SystemUsers {
    Table,
    UserId,
    Password,
    Active,
    Email,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    UserRole,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemUsers::UserId)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemUsers::Password).string().not_null())
                    .col(
                        ColumnDef::new(SystemUsers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SystemUsers::Email)
                            .string_len(75)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::UserRole).string_len(50).not_null())
                    .col(ColumnDef::new(Roles::UserId).string_len(20).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roles_system_user")
                            .from(Roles::Table, Roles::UserId)
                            .to(SystemUsers::Table, SystemUsers::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .check(Expr::cust(
                        "(user_role IN ('ROLE_EMPLOYEE','ROLE_MANAGER','ROLE_ADMIN'))",
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_roles_user_role")
                    .table(Roles::Table)
                    .col(Roles::UserId)
                    .col(Roles::UserRole)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemUsers::Table).if_exists().to_owned())
            .await
    }
}
