use crate::commands::{required, Command};
use crate::{db::DbPool, entities::farm, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Registers a farm under an existing producer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateFarmCommand {
    #[validate(required)]
    pub producer_id: Option<Uuid>,
    #[validate(required, length(min = 1, max = 100))]
    pub cadastral_number: Option<String>,
    #[validate(required, length(min = 1, max = 200))]
    pub municipality: Option<String>,
}

#[async_trait]
impl Command for CreateFarmCommand {
    type Result = farm::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            metrics::record_rejected("farm");
            error!("Invalid farm input: {}", e);
            ServiceError::from(e)
        })?;

        let db = db_pool.as_ref();

        let farm = farm::ActiveModel {
            id: Set(Uuid::new_v4()),
            producer_id: Set(required(&self.producer_id, "producer_id")?),
            cadastral_number: Set(required(&self.cadastral_number, "cadastral_number")?),
            municipality: Set(required(&self.municipality, "municipality")?),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let result = farm.insert(db).await.map_err(|e| {
            metrics::record_failed("farm");
            error!("Failed to create farm: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            farm_id = %result.id,
            producer_id = %result.producer_id,
            cadastral_number = %result.cadastral_number,
            "Farm created successfully"
        );
        metrics::record_created("farm");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_is_required() {
        let command = CreateFarmCommand {
            producer_id: None,
            cadastral_number: Some("F-001".into()),
            municipality: Some("Pereira".into()),
        };
        let err: ServiceError = command.validate().unwrap_err().into();
        assert_eq!(err.invalid_fields(), ["producer_id"]);
    }

    #[test]
    fn municipality_is_required() {
        let command = CreateFarmCommand {
            producer_id: Some(Uuid::new_v4()),
            cadastral_number: Some("F-001".into()),
            municipality: None,
        };
        let err: ServiceError = command.validate().unwrap_err().into();
        assert_eq!(err.invalid_fields(), ["municipality"]);
    }
}
