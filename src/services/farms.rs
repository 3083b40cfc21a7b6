use crate::{
    commands::farms::CreateFarmCommand, commands::Command, db::DbPool, entities::farm,
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for managing farms
#[derive(Clone)]
pub struct FarmService {
    db_pool: Arc<DbPool>,
}

impl FarmService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a farm under an existing producer
    #[instrument(skip(self))]
    pub async fn create_farm(&self, command: CreateFarmCommand) -> Result<farm::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Looks a farm up by its cadastral number within one producer
    #[instrument(skip(self))]
    pub async fn get_by_cadastral_number(
        &self,
        producer_id: Uuid,
        cadastral_number: &str,
    ) -> Result<Option<farm::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let farm = farm::Entity::find()
            .filter(farm::Column::ProducerId.eq(producer_id))
            .filter(farm::Column::CadastralNumber.eq(cadastral_number))
            .one(db)
            .await?;
        Ok(farm)
    }

    #[instrument(skip(self))]
    pub async fn get_farm(&self, farm_id: Uuid) -> Result<farm::Model, ServiceError> {
        farm::Entity::find_by_id(farm_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found("Farm", farm_id))
    }

    /// Lists a producer's farms ordered by cadastral number
    #[instrument(skip(self))]
    pub async fn list_farms_for_producer(
        &self,
        producer_id: Uuid,
    ) -> Result<Vec<farm::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let farms = farm::Entity::find()
            .filter(farm::Column::ProducerId.eq(producer_id))
            .order_by_asc(farm::Column::CadastralNumber)
            .all(db)
            .await?;
        Ok(farms)
    }

    /// Deletes a farm and its nurseries
    #[instrument(skip(self))]
    pub async fn delete_farm(&self, farm_id: Uuid) -> Result<(), ServiceError> {
        let farm = self.get_farm(farm_id).await?;
        farm.delete(self.db_pool.as_ref()).await?;
        info!(farm_id = %farm_id, "Farm deleted");
        Ok(())
    }
}
