//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        transaction: m.transaction,
        amount: m.amount,
        initiator: m.initiator,
        session_id: m.session_id,
        parking_lot_id: m.parking_lot_id,
        method: m.method,
        issuer: m.issuer,
        bank: m.bank,
        completed: m.completed,
        hash: m.hash,
        created_at: m.created_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn save(&self, p: Payment) -> DomainResult<Payment> {
        debug!("Saving payment: {}", p.transaction);

        let model = payment::ActiveModel {
            id: NotSet,
            transaction: Set(p.transaction),
            amount: Set(p.amount),
            initiator: Set(p.initiator),
            session_id: Set(p.session_id),
            parking_lot_id: Set(p.parking_lot_id),
            method: Set(p.method),
            issuer: Set(p.issuer),
            bank: Set(p.bank),
            completed: Set(p.completed),
            hash: Set(p.hash),
            created_at: Set(p.created_at),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_initiator(&self, username: &str) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::Initiator.eq(username))
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, p: Payment) -> DomainResult<()> {
        let existing = payment::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Payment", "id", p.id));
        }

        let model = payment::ActiveModel {
            id: Set(p.id),
            transaction: Set(p.transaction),
            amount: Set(p.amount),
            initiator: Set(p.initiator),
            session_id: Set(p.session_id),
            parking_lot_id: Set(p.parking_lot_id),
            method: Set(p.method),
            issuer: Set(p.issuer),
            bank: Set(p.bank),
            completed: Set(p.completed),
            hash: Set(p.hash),
            created_at: Set(p.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        payment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
