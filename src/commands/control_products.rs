use crate::commands::{blank_to_none, decimal_fits, required, validate_parts, Command};
use crate::entities::{control_product, fertilizer_control, fungus_control, pest_control};
use crate::services::control_products::{ControlKind, ControlProductDetails};
use crate::{db::DbPool, errors::ServiceError, metrics};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use futures::future::BoxFuture;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Fields shared by every control product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ControlProductFields {
    #[validate(length(max = 100))]
    pub registration_number: Option<String>,
    #[validate(required, length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(required, range(min = 1))]
    pub application_frequency_days: Option<i32>,
    #[validate(custom = "validate_money")]
    pub value: Option<Decimal>,
}

fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if !decimal_fits(value, 12, 2) {
        let mut err = ValidationError::new("value");
        err.message = Some("value allows at most 12 digits with 2 decimal places".into());
        return Err(err);
    }
    Ok(())
}

impl ControlProductFields {
    fn to_active_model(&self, id: Uuid) -> Result<control_product::ActiveModel, ServiceError> {
        Ok(control_product::ActiveModel {
            id: Set(id),
            registration_number: Set(blank_to_none(&self.registration_number)),
            name: Set(required(&self.name, "name")?),
            application_frequency_days: Set(required(
                &self.application_frequency_days,
                "application_frequency_days",
            )?),
            value: Set(self.value),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        })
    }
}

/// Inserts the base row and its subtype row in one transaction.
async fn insert_specialized<F>(
    db_pool: &DbPool,
    entity: &'static str,
    base: control_product::ActiveModel,
    insert_subtype: F,
) -> Result<ControlProductDetails, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction, Uuid) -> BoxFuture<'c, Result<ControlKind, ServiceError>>
        + Send
        + 'static,
{
    let details = db_pool
        .transaction::<_, ControlProductDetails, ServiceError>(move |txn| {
            Box::pin(async move {
                let product = base.insert(txn).await?;
                let kind = insert_subtype(txn, product.id).await?;
                Ok(ControlProductDetails { product, kind })
            })
        })
        .await
        .map_err(|e| {
            metrics::record_failed(entity);
            let err = ServiceError::from(e);
            error!("Failed to create {}: {}", entity, err);
            err
        })?;

    info!(
        product_id = %details.product.id,
        name = %details.product.name,
        kind = details.kind.label(),
        "Control product created successfully"
    );
    metrics::record_created(entity);

    Ok(details)
}

fn rejected(entity: &str, err: ServiceError) -> ServiceError {
    metrics::record_rejected(entity);
    error!("Invalid {} input: {}", entity, err);
    err
}

/// Registers a product with no specialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateControlProductCommand {
    #[serde(flatten)]
    pub base: ControlProductFields,
}

#[async_trait]
impl Command for CreateControlProductCommand {
    type Result = control_product::Model;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        self.base
            .validate()
            .map_err(|e| rejected("control_product", e.into()))?;

        let product = self
            .base
            .to_active_model(Uuid::new_v4())?
            .insert(db_pool.as_ref())
            .await
            .map_err(|e| {
                metrics::record_failed("control_product");
                error!("Failed to create control product: {}", e);
                ServiceError::from(e)
            })?;

        info!(product_id = %product.id, name = %product.name, "Control product created successfully");
        metrics::record_created("control_product");

        Ok(product)
    }
}

/// Registers a fungicide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateFungusControlCommand {
    #[serde(flatten)]
    pub base: ControlProductFields,
    #[validate(required, range(min = 0))]
    pub withdrawal_period_days: Option<i32>,
    #[validate(required, length(min = 1, max = 200))]
    pub fungus_name: Option<String>,
}

#[async_trait]
impl Command for CreateFungusControlCommand {
    type Result = ControlProductDetails;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        validate_parts(&[&self.base, self]).map_err(|e| rejected("fungus_control", e))?;

        let base = self.base.to_active_model(Uuid::new_v4())?;
        let withdrawal_period_days =
            required(&self.withdrawal_period_days, "withdrawal_period_days")?;
        let fungus_name = required(&self.fungus_name, "fungus_name")?;

        insert_specialized(db_pool.as_ref(), "fungus_control", base, move |txn, product_id| {
            Box::pin(async move {
                let fungus = fungus_control::ActiveModel {
                    product_id: Set(product_id),
                    withdrawal_period_days: Set(withdrawal_period_days),
                    fungus_name: Set(fungus_name),
                }
                .insert(txn)
                .await?;
                Ok(ControlKind::Fungus(fungus))
            })
        })
        .await
    }
}

/// Registers a pesticide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePestControlCommand {
    #[serde(flatten)]
    pub base: ControlProductFields,
    #[validate(required, range(min = 0))]
    pub withdrawal_period_days: Option<i32>,
}

#[async_trait]
impl Command for CreatePestControlCommand {
    type Result = ControlProductDetails;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        validate_parts(&[&self.base, self]).map_err(|e| rejected("pest_control", e))?;

        let base = self.base.to_active_model(Uuid::new_v4())?;
        let withdrawal_period_days =
            required(&self.withdrawal_period_days, "withdrawal_period_days")?;

        insert_specialized(db_pool.as_ref(), "pest_control", base, move |txn, product_id| {
            Box::pin(async move {
                let pest = pest_control::ActiveModel {
                    product_id: Set(product_id),
                    withdrawal_period_days: Set(withdrawal_period_days),
                }
                .insert(txn)
                .await?;
                Ok(ControlKind::Pest(pest))
            })
        })
        .await
    }
}

/// Registers a fertilizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateFertilizerControlCommand {
    #[serde(flatten)]
    pub base: ControlProductFields,
    pub application_date: Option<NaiveDate>,
}

#[async_trait]
impl Command for CreateFertilizerControlCommand {
    type Result = ControlProductDetails;

    #[instrument(skip(self, db_pool))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        validate_parts(&[&self.base, self]).map_err(|e| rejected("fertilizer_control", e))?;

        let base = self.base.to_active_model(Uuid::new_v4())?;
        let application_date = self.application_date;

        insert_specialized(
            db_pool.as_ref(),
            "fertilizer_control",
            base,
            move |txn, product_id| {
                Box::pin(async move {
                    let fertilizer = fertilizer_control::ActiveModel {
                        product_id: Set(product_id),
                        application_date: Set(application_date),
                    }
                    .insert(txn)
                    .await?;
                    Ok(ControlKind::Fertilizer(fertilizer))
                })
            },
        )
        .await
    }
}
