//! Discount DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::DiscountSpec;
use crate::domain::discount::DiscountCode;

/// Request to create a discount with a chosen code
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDiscountRequest {
    pub code: String,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub percentage: Option<Decimal>,
    pub lot_id: Option<i64>,
    pub user_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Request to generate a discount with a random code
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct GenerateDiscountRequest {
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub percentage: Option<Decimal>,
    pub lot_id: Option<i64>,
    pub user_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Request to edit a discount; unset fields keep their value
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct UpdateDiscountRequest {
    pub code: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub percentage: Option<Decimal>,
    pub lot_id: Option<i64>,
    pub user_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl CreateDiscountRequest {
    pub fn spec(&self) -> DiscountSpec {
        DiscountSpec {
            amount: self.amount,
            percentage: self.percentage,
            lot_id: self.lot_id,
            user_id: self.user_id.clone(),
            expiration_date: self.expiration_date,
        }
    }
}

impl GenerateDiscountRequest {
    pub fn spec(&self) -> DiscountSpec {
        DiscountSpec {
            amount: self.amount,
            percentage: self.percentage,
            lot_id: self.lot_id,
            user_id: self.user_id.clone(),
            expiration_date: self.expiration_date,
        }
    }
}

/// Discount details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct DiscountDto {
    pub id: i64,
    pub code: String,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub percentage: Option<Decimal>,
    pub lot_id: Option<i64>,
    pub user_id: Option<String>,
    pub expiration_date: Option<String>,
    pub created_at: String,
}

impl From<DiscountCode> for DiscountDto {
    fn from(d: DiscountCode) -> Self {
        Self {
            id: d.id,
            code: d.code,
            amount: d.amount,
            percentage: d.percentage,
            lot_id: d.lot_id,
            user_id: d.user_id,
            expiration_date: d.expiration_date.map(|t| t.to_rfc3339()),
            created_at: d.created_at.to_rfc3339(),
        }
    }
}
