//! User repository interface

use async_trait::async_trait;

use super::model::User;
use crate::shared::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: User) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn update(&self, user: User) -> DomainResult<()>;
}
