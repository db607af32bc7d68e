//! SeaORM implementation of DiscountRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::db_err;
use crate::domain::discount::{DiscountCode, DiscountRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::discount_code;

pub struct SeaOrmDiscountRepository {
    db: DatabaseConnection,
}

impl SeaOrmDiscountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: discount_code::Model) -> DiscountCode {
    DiscountCode {
        id: m.id,
        code: m.code,
        amount: m.amount,
        percentage: m.percentage,
        lot_id: m.lot_id,
        user_id: m.user_id,
        expiration_date: m.expiration_date,
        created_at: m.created_at,
    }
}

#[async_trait]
impl DiscountRepository for SeaOrmDiscountRepository {
    async fn save(&self, d: DiscountCode) -> DomainResult<DiscountCode> {
        debug!("Saving discount code: {}", d.code);

        let code = d.code.clone();
        let model = discount_code::ActiveModel {
            id: NotSet,
            code: Set(d.code),
            amount: Set(d.amount),
            percentage: Set(d.percentage),
            lot_id: Set(d.lot_id),
            user_id: Set(d.user_id),
            expiration_date: Set(d.expiration_date),
            created_at: Set(d.created_at),
        };
        match model.insert(&self.db).await {
            Ok(inserted) => Ok(model_to_domain(inserted)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(DomainError::Conflict(format!(
                    "Discount code '{}' already exists",
                    code
                ))),
                _ => Err(db_err(e)),
            },
        }
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<DiscountCode>> {
        let model = discount_code::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<DiscountCode>> {
        let model = discount_code::Entity::find()
            .filter(discount_code::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<DiscountCode>> {
        let models = discount_code::Entity::find()
            .order_by_asc(discount_code::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, d: DiscountCode) -> DomainResult<()> {
        let existing = discount_code::Entity::find_by_id(d.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("DiscountCode", "id", d.id));
        }

        let model = discount_code::ActiveModel {
            id: Set(d.id),
            code: Set(d.code),
            amount: Set(d.amount),
            percentage: Set(d.percentage),
            lot_id: Set(d.lot_id),
            user_id: Set(d.user_id),
            expiration_date: Set(d.expiration_date),
            created_at: Set(d.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        discount_code::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
