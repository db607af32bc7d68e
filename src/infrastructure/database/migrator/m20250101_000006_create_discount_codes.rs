//! Create discount_codes table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DiscountCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DiscountCodes::Amount).decimal())
                    .col(ColumnDef::new(DiscountCodes::Percentage).decimal())
                    .col(ColumnDef::new(DiscountCodes::LotId).big_integer())
                    .col(ColumnDef::new(DiscountCodes::UserId).string())
                    .col(ColumnDef::new(DiscountCodes::ExpirationDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(DiscountCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_discount_codes_code")
                    .table(DiscountCodes::Table)
                    .col(DiscountCodes::Code)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DiscountCodes {
    Table,
    Id,
    Code,
    Amount,
    Percentage,
    LotId,
    UserId,
    ExpirationDate,
    CreatedAt,
}
