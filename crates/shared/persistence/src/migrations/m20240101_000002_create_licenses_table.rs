//! Migration: Create licenses table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Licenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Licenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Licenses::FullName).string().not_null())
                    .col(ColumnDef::new(Licenses::LicenseNumber).string().not_null())
                    .col(ColumnDef::new(Licenses::Email).string().not_null())
                    .col(ColumnDef::new(Licenses::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Licenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Licenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_licenses_license_number")
                    .table(Licenses::Table)
                    .col(Licenses::LicenseNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_licenses_email")
                    .table(Licenses::Table)
                    .col(Licenses::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Licenses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Licenses {
    Table,
    Id,
    FullName,
    LicenseNumber,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
