use crate::commands::{blank_to_none, required, Command};
use crate::{db::DbPool, entities::producer, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Registers a new producer. Every field but phone and email is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateProducerCommand {
    #[validate(required, length(min = 1, max = 20))]
    pub document_type: Option<String>,
    #[validate(required, length(min = 1, max = 50))]
    pub document_number: Option<String>,
    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 200))]
    pub email: Option<String>,
}

#[async_trait]
impl Command for CreateProducerCommand {
    type Result = producer::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            metrics::record_rejected("producer");
            error!("Invalid producer input: {}", e);
            ServiceError::from(e)
        })?;

        let db = db_pool.as_ref();

        let producer = producer::ActiveModel {
            id: Set(Uuid::new_v4()),
            document_type: Set(required(&self.document_type, "document_type")?),
            document_number: Set(required(&self.document_number, "document_number")?),
            name: Set(required(&self.name, "name")?),
            surname: Set(required(&self.surname, "surname")?),
            phone: Set(blank_to_none(&self.phone)),
            email: Set(blank_to_none(&self.email)),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let result = producer.insert(db).await.map_err(|e| {
            metrics::record_failed("producer");
            error!("Failed to create producer: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            producer_id = %result.id,
            document_number = %result.document_number,
            "Producer created successfully"
        );
        metrics::record_created("producer");

        Ok(result)
    }
}
