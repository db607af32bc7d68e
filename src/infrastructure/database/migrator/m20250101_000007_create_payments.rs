//! Create payments table

use sea_orm_migration::prelude::*;

use super::m20250101_000004_create_parking_sessions::ParkingSessions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::Transaction)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Payments::Amount).decimal().not_null())
                    .col(ColumnDef::new(Payments::Initiator).string().not_null())
                    .col(ColumnDef::new(Payments::SessionId).big_integer())
                    .col(ColumnDef::new(Payments::ParkingLotId).big_integer())
                    .col(ColumnDef::new(Payments::Method).string())
                    .col(ColumnDef::new(Payments::Issuer).string())
                    .col(ColumnDef::new(Payments::Bank).string())
                    .col(
                        ColumnDef::new(Payments::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Payments::Hash).string().not_null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_session")
                            .from(Payments::Table, Payments::SessionId)
                            .to(ParkingSessions::Table, ParkingSessions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_initiator")
                    .table(Payments::Table)
                    .col(Payments::Initiator)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Payments {
    Table,
    Id,
    Transaction,
    Amount,
    Initiator,
    SessionId,
    ParkingLotId,
    Method,
    Issuer,
    Bank,
    Completed,
    Hash,
    CreatedAt,
}
