//! Create parking_lots table
//!
//! Holds capacity and the reserved counter the reservation ledger
//! increments and decrements atomically.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingLots::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ParkingLots::Name).string().not_null())
                    .col(ColumnDef::new(ParkingLots::Location).string().not_null())
                    .col(ColumnDef::new(ParkingLots::Address).string())
                    .col(
                        ColumnDef::new(ParkingLots::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::Reserved)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::Tariff)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::DayTariff)
                            .decimal()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingLots::Lat).double())
                    .col(ColumnDef::new(ParkingLots::Lng).double())
                    .col(
                        ColumnDef::new(ParkingLots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingLots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingLots {
    Table,
    Id,
    Name,
    Location,
    Address,
    Capacity,
    Reserved,
    Tariff,
    DayTariff,
    Lat,
    Lng,
    CreatedAt,
}
