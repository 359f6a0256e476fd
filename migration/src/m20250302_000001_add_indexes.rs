use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Tenants {
    Table,
    OwnerId,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    OwnerId,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    PropertyId,
    TenantId,
    Status,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    ContractId,
    DueDate,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owner-scoped listings
        manager
            .create_index(
                Index::create()
                    .name("idx_tenants_owner_id")
                    .table(Tenants::Table)
                    .col(Tenants::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_owner_id")
                    .table(Properties::Table)
                    .col(Properties::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Active-contract lookup per property
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_property_id_status")
                    .table(Contracts::Table)
                    .col(Contracts::PropertyId)
                    .col(Contracts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_tenant_id")
                    .table(Contracts::Table)
                    .col(Contracts::TenantId)
                    .to_owned(),
            )
            .await?;

        // Payments by contract, and overdue/period scans by due date
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_contract_id")
                    .table(Payments::Table)
                    .col(Payments::ContractId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_due_date")
                    .table(Payments::Table)
                    .col(Payments::DueDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_tenants_owner_id",
            "idx_properties_owner_id",
            "idx_contracts_property_id_status",
            "idx_contracts_tenant_id",
            "idx_payments_contract_id",
            "idx_payments_due_date",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
