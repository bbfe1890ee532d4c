use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Each module tracks its own migrations so the migrators can run
    // against one shared database without seeing each other's history.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_schedule").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_schedules::Migration)]
    }
}

mod m20250301_000001_create_schedules {
    use sea_orm_migration::prelude::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[derive(DeriveIden)]
    enum Schedules {
        Table,
        Id,
        OwnerId,
        Title,
        StartMin,
        EndMin,
        Color,
        CreatedAt,
        UpdatedAt,
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Schedules::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Schedules::OwnerId).uuid().not_null())
                        .col(ColumnDef::new(Schedules::Title).string().not_null())
                        .col(ColumnDef::new(Schedules::StartMin).small_integer().not_null())
                        .col(ColumnDef::new(Schedules::EndMin).small_integer().not_null())
                        .col(ColumnDef::new(Schedules::Color).string().not_null())
                        .col(
                            ColumnDef::new(Schedules::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Schedules::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // The overlap check scans one owner's interval range
            manager
                .create_index(
                    Index::create()
                        .name("idx_schedules_owner_start")
                        .table(Schedules::Table)
                        .col(Schedules::OwnerId)
                        .col(Schedules::StartMin)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Schedules::Table).to_owned())
                .await
        }
    }
}
