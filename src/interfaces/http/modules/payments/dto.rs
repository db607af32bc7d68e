//! Payment DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::PaymentInstrument;
use crate::domain::payment::Payment;

/// Instrument details for paying a session
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct PaySessionRequest {
    pub method: Option<String>,
    pub issuer: Option<String>,
    pub bank: Option<String>,
}

/// Request to record a standalone payment (staff only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManualPaymentRequest {
    /// Username the payment is recorded for
    pub initiator: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub method: Option<String>,
    pub issuer: Option<String>,
    pub bank: Option<String>,
}

impl PaySessionRequest {
    pub fn instrument(self) -> PaymentInstrument {
        PaymentInstrument {
            method: self.method,
            issuer: self.issuer,
            bank: self.bank,
        }
    }
}

impl ManualPaymentRequest {
    pub fn instrument(&self) -> PaymentInstrument {
        PaymentInstrument {
            method: self.method.clone(),
            issuer: self.issuer.clone(),
            bank: self.bank.clone(),
        }
    }
}

/// Query filter for listing payments
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct PaymentListQuery {
    /// Another user's payments; requires staff privileges
    pub user: Option<String>,
}

/// Payment details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i64,
    pub transaction: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub initiator: String,
    pub session_id: Option<i64>,
    pub parking_lot_id: Option<i64>,
    pub method: Option<String>,
    pub issuer: Option<String>,
    pub bank: Option<String>,
    pub completed: bool,
    pub created_at: String,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            transaction: p.transaction,
            amount: p.amount,
            initiator: p.initiator,
            session_id: p.session_id,
            parking_lot_id: p.parking_lot_id,
            method: p.method,
            issuer: p.issuer,
            bank: p.bank,
            completed: p.completed,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}
