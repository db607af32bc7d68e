//! Parking session entity
//!
//! A partial unique index on (licenseplate) WHERE stopped IS NULL backs
//! the one-active-session-per-plate invariant; see the sessions
//! migration.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub parking_lot_id: i64,

    /// Normalized (uppercased) license plate
    pub licenseplate: String,

    pub started: DateTimeUtc,

    #[sea_orm(nullable)]
    pub stopped: Option<DateTimeUtc>,

    /// Username of the owning principal
    pub username: String,

    pub duration_minutes: Decimal,

    #[sea_orm(nullable)]
    pub cost: Option<Decimal>,

    /// pending or paid; NULL while active
    #[sea_orm(nullable)]
    pub payment_status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_lot::Entity",
        from = "Column::ParkingLotId",
        to = "super::parking_lot::Column::Id"
    )]
    ParkingLot,
}

impl Related<super::parking_lot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
