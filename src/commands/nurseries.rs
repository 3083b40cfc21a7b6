use crate::commands::{required, Command};
use crate::{db::DbPool, entities::nursery, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Registers a nursery inside an existing farm.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateNurseryCommand {
    #[validate(required)]
    pub farm_id: Option<Uuid>,
    #[validate(required, length(min = 1, max = 100))]
    pub code: Option<String>,
    #[validate(required, length(min = 1, max = 200))]
    pub crop_type: Option<String>,
}

#[async_trait]
impl Command for CreateNurseryCommand {
    type Result = nursery::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            metrics::record_rejected("nursery");
            error!("Invalid nursery input: {}", e);
            ServiceError::from(e)
        })?;

        let db = db_pool.as_ref();

        let nursery = nursery::ActiveModel {
            id: Set(Uuid::new_v4()),
            farm_id: Set(required(&self.farm_id, "farm_id")?),
            code: Set(required(&self.code, "code")?),
            crop_type: Set(required(&self.crop_type, "crop_type")?),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let result = nursery.insert(db).await.map_err(|e| {
            metrics::record_failed("nursery");
            error!("Failed to create nursery: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            nursery_id = %result.id,
            farm_id = %result.farm_id,
            code = %result.code,
            "Nursery created successfully"
        );
        metrics::record_created("nursery");

        Ok(result)
    }
}
