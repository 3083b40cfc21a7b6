use crate::{
    commands::producers::CreateProducerCommand,
    commands::Command,
    db::DbPool,
    entities::producer,
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Service for managing producers
#[derive(Clone)]
pub struct ProducerService {
    db_pool: Arc<DbPool>,
}

impl ProducerService {
    /// Creates a new producer service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a new producer
    #[instrument(skip(self))]
    pub async fn create_producer(
        &self,
        command: CreateProducerCommand,
    ) -> Result<producer::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Looks a producer up by identity document number
    #[instrument(skip(self))]
    pub async fn get_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<producer::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let producer = producer::Entity::find()
            .filter(producer::Column::DocumentNumber.eq(document_number))
            .one(db)
            .await?;
        Ok(producer)
    }

    /// Gets a producer by ID
    #[instrument(skip(self))]
    pub async fn get_producer(&self, producer_id: Uuid) -> Result<producer::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        producer::Entity::find_by_id(producer_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Producer", producer_id))
    }

    /// Lists every producer ordered by surname, then name
    #[instrument(skip(self))]
    pub async fn list_producers(&self) -> Result<Vec<producer::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let producers = producer::Entity::find()
            .order_by_asc(producer::Column::Surname)
            .order_by_asc(producer::Column::Name)
            .all(db)
            .await?;
        Ok(producers)
    }

    /// Deletes a producer together with its farms and everything below them
    #[instrument(skip(self))]
    pub async fn delete_producer(&self, producer_id: Uuid) -> Result<(), ServiceError> {
        let producer = self.get_producer(producer_id).await?;
        producer.delete(self.db_pool.as_ref()).await?;
        info!(producer_id = %producer_id, "Producer deleted");
        Ok(())
    }
}
