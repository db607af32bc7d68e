//! Payment repository interface

use async_trait::async_trait;

use super::model::Payment;
use crate::shared::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new payment and return it with the assigned id.
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Payment>>;
    async fn find_by_initiator(&self, username: &str) -> DomainResult<Vec<Payment>>;
    async fn update(&self, payment: Payment) -> DomainResult<()>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
