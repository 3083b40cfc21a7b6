use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_producers_table::Migration),
            Box::new(m20240101_000002_create_farms_table::Migration),
            Box::new(m20240101_000003_create_nurseries_table::Migration),
            Box::new(m20240101_000004_create_control_products_tables::Migration),
            Box::new(m20240101_000005_create_labors_table::Migration),
            Box::new(m20240101_000006_create_labor_products_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_producers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_producers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Producers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Producers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Producers::DocumentType)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Producers::DocumentNumber)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Producers::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Producers::Surname)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Producers::Phone).string_len(30).null())
                        .col(ColumnDef::new(Producers::Email).string_len(200).null())
                        .col(
                            ColumnDef::new(Producers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Producers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_producers_document_number")
                        .table(Producers::Table)
                        .col(Producers::DocumentNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Producers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Producers {
        Table,
        Id,
        DocumentType,
        DocumentNumber,
        Name,
        Surname,
        Phone,
        Email,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_farms_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_farms_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Farms::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Farms::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Farms::ProducerId).uuid().not_null())
                        .col(
                            ColumnDef::new(Farms::CadastralNumber)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Farms::Municipality)
                                .string_len(200)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Farms::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Farms::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_farms_producer_id")
                                .from(Farms::Table, Farms::ProducerId)
                                .to(Producers::Table, Producers::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Also serves lookups of a producer's farms.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_farms_producer_cadastral_number")
                        .table(Farms::Table)
                        .col(Farms::ProducerId)
                        .col(Farms::CadastralNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Farms::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Farms {
        Table,
        Id,
        ProducerId,
        CadastralNumber,
        Municipality,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Producers {
        Table,
        Id,
    }
}

mod m20240101_000003_create_nurseries_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_nurseries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Nurseries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Nurseries::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Nurseries::FarmId).uuid().not_null())
                        .col(ColumnDef::new(Nurseries::Code).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Nurseries::CropType)
                                .string_len(200)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Nurseries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Nurseries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_nurseries_farm_id")
                                .from(Nurseries::Table, Nurseries::FarmId)
                                .to(Farms::Table, Farms::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_nurseries_farm_code")
                        .table(Nurseries::Table)
                        .col(Nurseries::FarmId)
                        .col(Nurseries::Code)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Nurseries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Nurseries {
        Table,
        Id,
        FarmId,
        Code,
        CropType,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Farms {
        Table,
        Id,
    }
}

mod m20240101_000004_create_control_products_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_control_products_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ControlProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ControlProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::RegistrationNumber)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::Name)
                                .string_len(200)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::ApplicationFrequencyDays)
                                .integer()
                                .not_null()
                                .check(Expr::col(ControlProducts::ApplicationFrequencyDays).gt(0)),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::Value)
                                .decimal_len(12, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ControlProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Subtype tables share the base row's id as their primary key.
            manager
                .create_table(
                    Table::create()
                        .table(FungusControls::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FungusControls::ProductId)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FungusControls::WithdrawalPeriodDays)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FungusControls::FungusName)
                                .string_len(200)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_fungus_controls_product_id")
                                .from(FungusControls::Table, FungusControls::ProductId)
                                .to(ControlProducts::Table, ControlProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PestControls::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PestControls::ProductId)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PestControls::WithdrawalPeriodDays)
                                .integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pest_controls_product_id")
                                .from(PestControls::Table, PestControls::ProductId)
                                .to(ControlProducts::Table, ControlProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FertilizerControls::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FertilizerControls::ProductId)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FertilizerControls::ApplicationDate)
                                .date()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_fertilizer_controls_product_id")
                                .from(FertilizerControls::Table, FertilizerControls::ProductId)
                                .to(ControlProducts::Table, ControlProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FertilizerControls::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PestControls::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FungusControls::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ControlProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ControlProducts {
        Table,
        Id,
        RegistrationNumber,
        Name,
        ApplicationFrequencyDays,
        Value,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum FungusControls {
        Table,
        ProductId,
        WithdrawalPeriodDays,
        FungusName,
    }

    #[derive(DeriveIden)]
    enum PestControls {
        Table,
        ProductId,
        WithdrawalPeriodDays,
    }

    #[derive(DeriveIden)]
    enum FertilizerControls {
        Table,
        ProductId,
        ApplicationDate,
    }
}

mod m20240101_000005_create_labors_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_labors_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Labors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Labors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Labors::NurseryId).uuid().not_null())
                        .col(ColumnDef::new(Labors::Date).date().not_null())
                        .col(ColumnDef::new(Labors::Description).text().null())
                        .col(ColumnDef::new(Labors::Type).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Labors::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Labors::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_labors_nursery_id")
                                .from(Labors::Table, Labors::NurseryId)
                                .to(Nurseries::Table, Nurseries::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_labors_nursery_date")
                        .table(Labors::Table)
                        .col(Labors::NurseryId)
                        .col(Labors::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Labors::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Labors {
        Table,
        Id,
        NurseryId,
        Date,
        Description,
        Type,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Nurseries {
        Table,
        Id,
    }
}

mod m20240101_000006_create_labor_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_labor_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LaborProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LaborProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LaborProducts::LaborId).uuid().not_null())
                        .col(ColumnDef::new(LaborProducts::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(LaborProducts::Quantity)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LaborProducts::ApplicationDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LaborProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(LaborProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_labor_products_labor_id")
                                .from(LaborProducts::Table, LaborProducts::LaborId)
                                .to(Labors::Table, Labors::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_labor_products_product_id")
                                .from(LaborProducts::Table, LaborProducts::ProductId)
                                .to(ControlProducts::Table, ControlProducts::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_labor_products_labor_id")
                        .table(LaborProducts::Table)
                        .col(LaborProducts::LaborId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_labor_products_product_id")
                        .table(LaborProducts::Table)
                        .col(LaborProducts::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LaborProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum LaborProducts {
        Table,
        Id,
        LaborId,
        ProductId,
        Quantity,
        ApplicationDate,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Labors {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum ControlProducts {
        Table,
        Id,
    }
}
