//! SeaORM implementation of ParkingSessionRepository
//!
//! Relies on the partial unique index uq_parking_sessions_active_plate
//! to reject a second active insert for the same plate; the violation is
//! translated to `DomainError::Conflict`.

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::db_err;
use crate::domain::parking_session::{ParkingSession, ParkingSessionRepository, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::parking_session;

pub struct SeaOrmParkingSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: parking_session::Model) -> ParkingSession {
    ParkingSession {
        id: m.id,
        parking_lot_id: m.parking_lot_id,
        licenseplate: m.licenseplate,
        started: m.started,
        stopped: m.stopped,
        username: m.username,
        duration_minutes: m.duration_minutes,
        cost: m.cost,
        payment_status: m.payment_status.as_deref().map(PaymentStatus::from_str),
    }
}

#[async_trait]
impl ParkingSessionRepository for SeaOrmParkingSessionRepository {
    async fn insert_active(&self, s: ParkingSession) -> DomainResult<ParkingSession> {
        debug!("Inserting active session for plate: {}", s.licenseplate);

        let plate = s.licenseplate.clone();
        let model = parking_session::ActiveModel {
            id: NotSet,
            parking_lot_id: Set(s.parking_lot_id),
            licenseplate: Set(s.licenseplate),
            started: Set(s.started),
            stopped: Set(None),
            username: Set(s.username),
            duration_minutes: Set(s.duration_minutes),
            cost: Set(s.cost),
            payment_status: Set(None),
        };
        match model.insert(&self.db).await {
            Ok(inserted) => Ok(model_to_domain(inserted)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(DomainError::Conflict(format!(
                    "An active session for plate '{}' already exists",
                    plate
                ))),
                _ => Err(db_err(e)),
            },
        }
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingSession>> {
        let model = parking_session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active_by_plate(
        &self,
        licenseplate: &str,
    ) -> DomainResult<Option<ParkingSession>> {
        let model = parking_session::Entity::find()
            .filter(parking_session::Column::Licenseplate.eq(licenseplate))
            .filter(parking_session::Column::Stopped.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_lot(&self, parking_lot_id: i64) -> DomainResult<Vec<ParkingSession>> {
        let models = parking_session::Entity::find()
            .filter(parking_session::Column::ParkingLotId.eq(parking_lot_id))
            .order_by_asc(parking_session::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Vec<ParkingSession>> {
        let models = parking_session::Entity::find()
            .filter(parking_session::Column::Username.eq(username))
            .order_by_asc(parking_session::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, s: ParkingSession) -> DomainResult<()> {
        let existing = parking_session::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("ParkingSession", "id", s.id));
        }

        let model = parking_session::ActiveModel {
            id: Set(s.id),
            parking_lot_id: Set(s.parking_lot_id),
            licenseplate: Set(s.licenseplate),
            started: Set(s.started),
            stopped: Set(s.stopped),
            username: Set(s.username),
            duration_minutes: Set(s.duration_minutes),
            cost: Set(s.cost),
            payment_status: Set(s.payment_status.map(|p| p.as_str().to_string())),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        parking_session::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
