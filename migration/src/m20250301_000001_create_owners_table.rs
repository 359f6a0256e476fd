use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `owners` table and its columns.
#[derive(DeriveIden)]
enum Owners {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Cpf,
    BirthDate,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Owners::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Owners::Name).string().not_null())
                    .col(ColumnDef::new(Owners::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Owners::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Owners::Phone).string().not_null())
                    .col(ColumnDef::new(Owners::Cpf).string_len(11).not_null().unique_key())
                    .col(ColumnDef::new(Owners::BirthDate).date().null())
                    .col(
                        ColumnDef::new(Owners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Owners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await
    }
}
