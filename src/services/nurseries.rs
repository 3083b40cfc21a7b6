use crate::{
    commands::nurseries::CreateNurseryCommand, commands::Command, db::DbPool, entities::nursery,
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for managing nurseries
#[derive(Clone)]
pub struct NurseryService {
    db_pool: Arc<DbPool>,
}

impl NurseryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn create_nursery(
        &self,
        command: CreateNurseryCommand,
    ) -> Result<nursery::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Looks a nursery up by its code within one farm
    #[instrument(skip(self))]
    pub async fn get_by_code(
        &self,
        farm_id: Uuid,
        code: &str,
    ) -> Result<Option<nursery::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let nursery = nursery::Entity::find()
            .filter(nursery::Column::FarmId.eq(farm_id))
            .filter(nursery::Column::Code.eq(code))
            .one(db)
            .await?;
        Ok(nursery)
    }

    #[instrument(skip(self))]
    pub async fn get_nursery(&self, nursery_id: Uuid) -> Result<nursery::Model, ServiceError> {
        nursery::Entity::find_by_id(nursery_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found("Nursery", nursery_id))
    }

    #[instrument(skip(self))]
    pub async fn list_nurseries_for_farm(
        &self,
        farm_id: Uuid,
    ) -> Result<Vec<nursery::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let nurseries = nursery::Entity::find()
            .filter(nursery::Column::FarmId.eq(farm_id))
            .order_by_asc(nursery::Column::Code)
            .all(db)
            .await?;
        Ok(nurseries)
    }

    /// Deletes a nursery and its labors
    #[instrument(skip(self))]
    pub async fn delete_nursery(&self, nursery_id: Uuid) -> Result<(), ServiceError> {
        let nursery = self.get_nursery(nursery_id).await?;
        nursery.delete(self.db_pool.as_ref()).await?;
        info!(nursery_id = %nursery_id, "Nursery deleted");
        Ok(())
    }
}
