//! Payment entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Human-facing transaction reference (PAY-...)
    #[sea_orm(unique)]
    pub transaction: String,

    pub amount: Decimal,

    /// Username of the paying principal
    pub initiator: String,

    #[sea_orm(nullable)]
    pub session_id: Option<i64>,

    #[sea_orm(nullable)]
    pub parking_lot_id: Option<i64>,

    #[sea_orm(nullable)]
    pub method: Option<String>,

    #[sea_orm(nullable)]
    pub issuer: Option<String>,

    #[sea_orm(nullable)]
    pub bank: Option<String>,

    pub completed: bool,

    /// Validation hash handed to the payment provider callback
    pub hash: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_session::Entity",
        from = "Column::SessionId",
        to = "super::parking_session::Column::Id"
    )]
    ParkingSession,
}

impl Related<super::parking_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
