//! Discount code repository interface

use async_trait::async_trait;

use super::model::DiscountCode;
use crate::shared::DomainResult;

#[async_trait]
pub trait DiscountRepository: Send + Sync {
    /// Persist a new code and return it with the assigned id.
    async fn save(&self, discount: DiscountCode) -> DomainResult<DiscountCode>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<DiscountCode>>;
    /// Exact code match.
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<DiscountCode>>;
    async fn find_all(&self) -> DomainResult<Vec<DiscountCode>>;
    async fn update(&self, discount: DiscountCode) -> DomainResult<()>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
