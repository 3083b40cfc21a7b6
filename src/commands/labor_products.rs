use crate::commands::{decimal_fits, required, Command};
use crate::{db::DbPool, entities::labor_product, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Links a control product to the labor that applied it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateLaborProductCommand {
    #[validate(required)]
    pub labor_id: Option<Uuid>,
    #[validate(required)]
    pub product_id: Option<Uuid>,
    #[validate(required, custom = "validate_quantity")]
    pub quantity: Option<Decimal>,
    #[validate(required)]
    pub application_date: Option<NaiveDate>,
}

fn validate_quantity(quantity: &Decimal) -> Result<(), ValidationError> {
    if !decimal_fits(quantity, 10, 2) {
        let mut err = ValidationError::new("quantity");
        err.message = Some("quantity allows at most 10 digits with 2 decimal places".into());
        return Err(err);
    }
    Ok(())
}

#[async_trait]
impl Command for CreateLaborProductCommand {
    type Result = labor_product::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            metrics::record_rejected("labor_product");
            error!("Invalid labor product input: {}", e);
            ServiceError::from(e)
        })?;

        let db = db_pool.as_ref();

        let labor_product = labor_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            labor_id: Set(required(&self.labor_id, "labor_id")?),
            product_id: Set(required(&self.product_id, "product_id")?),
            quantity: Set(required(&self.quantity, "quantity")?),
            application_date: Set(required(&self.application_date, "application_date")?),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let result = labor_product.insert(db).await.map_err(|e| {
            metrics::record_failed("labor_product");
            error!("Failed to create labor product: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            labor_product_id = %result.id,
            labor_id = %result.labor_id,
            product_id = %result.product_id,
            quantity = %result.quantity,
            "Labor product recorded successfully"
        );
        metrics::record_created("labor_product");

        Ok(result)
    }
}
