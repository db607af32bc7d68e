//! SeaORM implementation of ParkingLotRepository
//!
//! The slot claim and release are single conditional UPDATE statements;
//! the row count tells the caller whether the claim won.

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::parking_lot::{ParkingLot, ParkingLotRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::parking_lot;

pub struct SeaOrmParkingLotRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingLotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: parking_lot::Model) -> ParkingLot {
    ParkingLot {
        id: m.id,
        name: m.name,
        location: m.location,
        address: m.address,
        capacity: m.capacity,
        reserved: m.reserved,
        tariff: m.tariff,
        day_tariff: m.day_tariff,
        lat: m.lat,
        lng: m.lng,
        created_at: m.created_at,
    }
}

#[async_trait]
impl ParkingLotRepository for SeaOrmParkingLotRepository {
    async fn save(&self, l: ParkingLot) -> DomainResult<ParkingLot> {
        debug!("Saving parking lot: {}", l.name);

        let model = parking_lot::ActiveModel {
            id: NotSet,
            name: Set(l.name),
            location: Set(l.location),
            address: Set(l.address),
            capacity: Set(l.capacity),
            reserved: Set(l.reserved),
            tariff: Set(l.tariff),
            day_tariff: Set(l.day_tariff),
            lat: Set(l.lat),
            lng: Set(l.lng),
            created_at: Set(l.created_at),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingLot>> {
        let model = parking_lot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>> {
        let models = parking_lot::Entity::find()
            .order_by_asc(parking_lot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, l: ParkingLot) -> DomainResult<()> {
        let existing = parking_lot::Entity::find_by_id(l.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("ParkingLot", "id", l.id));
        }

        let model = parking_lot::ActiveModel {
            id: Set(l.id),
            name: Set(l.name),
            location: Set(l.location),
            address: Set(l.address),
            capacity: Set(l.capacity),
            reserved: Set(l.reserved),
            tariff: Set(l.tariff),
            day_tariff: Set(l.day_tariff),
            lat: Set(l.lat),
            lng: Set(l.lng),
            created_at: Set(l.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        parking_lot::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn try_claim_slot(&self, id: i64) -> DomainResult<bool> {
        // UPDATE parking_lots SET reserved = reserved + 1
        // WHERE id = ? AND reserved < capacity
        let result = parking_lot::Entity::update_many()
            .col_expr(
                parking_lot::Column::Reserved,
                Expr::col(parking_lot::Column::Reserved).add(1),
            )
            .filter(parking_lot::Column::Id.eq(id))
            .filter(
                Expr::col(parking_lot::Column::Reserved)
                    .lt(Expr::col(parking_lot::Column::Capacity)),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn release_slot(&self, id: i64) -> DomainResult<()> {
        // UPDATE parking_lots SET reserved = reserved - 1
        // WHERE id = ? AND reserved > 0
        parking_lot::Entity::update_many()
            .col_expr(
                parking_lot::Column::Reserved,
                Expr::col(parking_lot::Column::Reserved).sub(1),
            )
            .filter(parking_lot::Column::Id.eq(id))
            .filter(parking_lot::Column::Reserved.gt(0))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
