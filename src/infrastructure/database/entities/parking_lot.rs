//! Parking lot entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking_lots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    pub location: String,

    #[sea_orm(nullable)]
    pub address: Option<String>,

    pub capacity: i32,

    /// Committed reservation slots; only the ledger writes this
    pub reserved: i32,

    /// Hourly tariff
    pub tariff: Decimal,

    /// Flat rate per completed 24h block
    pub day_tariff: Decimal,

    #[sea_orm(nullable)]
    pub lat: Option<f64>,

    #[sea_orm(nullable)]
    pub lng: Option<f64>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parking_session::Entity")]
    ParkingSession,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::parking_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSession.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
