use crate::commands::{blank_to_none, required, Command};
use crate::entities::labor::{self, LaborType};
use crate::{db::DbPool, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Records a labor carried out at a nursery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateLaborCommand {
    #[validate(required)]
    pub nursery_id: Option<Uuid>,
    #[validate(required)]
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    #[validate(required)]
    pub labor_type: Option<LaborType>,
}

#[async_trait]
impl Command for CreateLaborCommand {
    type Result = labor::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            metrics::record_rejected("labor");
            error!("Invalid labor input: {}", e);
            ServiceError::from(e)
        })?;

        let db = db_pool.as_ref();

        let labor = labor::ActiveModel {
            id: Set(Uuid::new_v4()),
            nursery_id: Set(required(&self.nursery_id, "nursery_id")?),
            date: Set(required(&self.date, "date")?),
            description: Set(blank_to_none(&self.description)),
            labor_type: Set(required(&self.labor_type, "labor_type")?),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let result = labor.insert(db).await.map_err(|e| {
            metrics::record_failed("labor");
            error!("Failed to create labor: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            labor_id = %result.id,
            nursery_id = %result.nursery_id,
            labor_type = result.labor_type.as_ref(),
            date = %result.date,
            "Labor created successfully"
        );
        metrics::record_created("labor");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_command() -> CreateLaborCommand {
        CreateLaborCommand {
            nursery_id: Some(Uuid::new_v4()),
            date: NaiveDate::from_ymd_opt(2024, 5, 10),
            description: Some("Preventive application".into()),
            labor_type: Some(LaborType::PestApplication),
        }
    }

    #[test]
    fn accepts_complete_input_without_description() {
        let command = CreateLaborCommand {
            description: None,
            ..valid_command()
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn nursery_date_and_type_are_required() {
        let command = CreateLaborCommand {
            nursery_id: None,
            date: None,
            labor_type: None,
            ..valid_command()
        };
        let err: ServiceError = command.validate().unwrap_err().into();
        assert_eq!(err.invalid_fields(), ["date", "labor_type", "nursery_id"]);
    }
}
