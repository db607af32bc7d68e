//! Discount code entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discount_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub code: String,

    /// Flat deduction; takes precedence over percentage
    #[sea_orm(nullable)]
    pub amount: Option<Decimal>,

    #[sea_orm(nullable)]
    pub percentage: Option<Decimal>,

    /// Lot scope; NULL means any lot
    #[sea_orm(nullable)]
    pub lot_id: Option<i64>,

    /// User scope; NULL means any user
    #[sea_orm(nullable)]
    pub user_id: Option<String>,

    #[sea_orm(nullable)]
    pub expiration_date: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
