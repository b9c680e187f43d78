use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Position,
    Department,
    ManagerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Compensation {
    Table,
    Id,
    EmployeeId,
    SalaryCents,
    EffectiveDate,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

// Builder API only: the same schema must apply to Postgres and to the SQLite
// databases the integration tests run against, so ids and timestamps are
// assigned in application code rather than by column defaults.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Employee::LastName).string_len(128).not_null())
                    .col(ColumnDef::new(Employee::Position).string_len(256).not_null())
                    .col(ColumnDef::new(Employee::Department).string_len(256).not_null())
                    .col(ColumnDef::new(Employee::ManagerId).uuid())
                    .col(
                        ColumnDef::new(Employee::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_manager")
                            .from(Employee::Table, Employee::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_manager")
                    .table(Employee::Table)
                    .col(Employee::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Compensation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Compensation::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Compensation::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Compensation::SalaryCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Compensation::EffectiveDate).date().not_null())
                    .col(
                        ColumnDef::new(Compensation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_compensation_employee")
                            .from(Compensation::Table, Compensation::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_compensation_employee")
                    .table(Compensation::Table)
                    .col(Compensation::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Compensation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}
