//! Create parking_sessions table
//!
//! A partial unique index enforces at most one active session (stopped
//! IS NULL) per license plate at the store level. SeaQuery cannot
//! express the WHERE clause, so it is raw SQL; the syntax is valid on
//! both SQLite and PostgreSQL.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_parking_lots::ParkingLots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingSessions::ParkingLotId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSessions::Licenseplate)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSessions::Started)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingSessions::Stopped).timestamp_with_time_zone())
                    .col(ColumnDef::new(ParkingSessions::Username).string().not_null())
                    .col(
                        ColumnDef::new(ParkingSessions::DurationMinutes)
                            .decimal()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ParkingSessions::Cost).decimal())
                    .col(ColumnDef::new(ParkingSessions::PaymentStatus).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_sessions_lot")
                            .from(ParkingSessions::Table, ParkingSessions::ParkingLotId)
                            .to(ParkingLots::Table, ParkingLots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_sessions_username")
                    .table(ParkingSessions::Table)
                    .col(ParkingSessions::Username)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_sessions_lot")
                    .table(ParkingSessions::Table)
                    .col(ParkingSessions::ParkingLotId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_parking_sessions_active_plate \
                 ON parking_sessions (licenseplate) WHERE stopped IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingSessions {
    Table,
    Id,
    ParkingLotId,
    Licenseplate,
    Started,
    Stopped,
    Username,
    DurationMinutes,
    Cost,
    PaymentStatus,
}
