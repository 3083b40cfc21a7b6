use crate::{
    commands::control_products::{
        CreateControlProductCommand, CreateFertilizerControlCommand, CreateFungusControlCommand,
        CreatePestControlCommand,
    },
    commands::Command,
    db::DbPool,
    entities::{control_product, fertilizer_control, fungus_control, pest_control},
    errors::ServiceError,
};
use sea_orm::{EntityTrait, ModelTrait, QueryOrder};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Specialization of a control product, read from its subtype table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Fungus(fungus_control::Model),
    Pest(pest_control::Model),
    Fertilizer(fertilizer_control::Model),
    Generic,
}

impl ControlKind {
    pub fn label(&self) -> &'static str {
        match self {
            ControlKind::Fungus(_) => "fungus",
            ControlKind::Pest(_) => "pest",
            ControlKind::Fertilizer(_) => "fertilizer",
            ControlKind::Generic => "generic",
        }
    }

    /// Withdrawal period for fungus and pest controls.
    pub fn withdrawal_period_days(&self) -> Option<i32> {
        match self {
            ControlKind::Fungus(fungus) => Some(fungus.withdrawal_period_days),
            ControlKind::Pest(pest) => Some(pest.withdrawal_period_days),
            _ => None,
        }
    }
}

/// A control product with its specialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlProductDetails {
    pub product: control_product::Model,
    pub kind: ControlKind,
}

impl fmt::Display for ControlProductDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.product, f)
    }
}

/// Service for managing the control product catalog
#[derive(Clone)]
pub struct ControlProductService {
    db_pool: Arc<DbPool>,
}

impl ControlProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a product with no specialization
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        command: CreateControlProductCommand,
    ) -> Result<control_product::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    #[instrument(skip(self))]
    pub async fn create_fungus_control(
        &self,
        command: CreateFungusControlCommand,
    ) -> Result<ControlProductDetails, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    #[instrument(skip(self))]
    pub async fn create_pest_control(
        &self,
        command: CreatePestControlCommand,
    ) -> Result<ControlProductDetails, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    #[instrument(skip(self))]
    pub async fn create_fertilizer_control(
        &self,
        command: CreateFertilizerControlCommand,
    ) -> Result<ControlProductDetails, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Gets a product by ID together with its specialization
    #[instrument(skip(self))]
    pub async fn get_product(
        &self,
        product_id: Uuid,
    ) -> Result<ControlProductDetails, ServiceError> {
        let db = self.db_pool.as_ref();
        let product = control_product::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Control product", product_id))?;

        let kind = self.load_kind(product_id).await?;
        Ok(ControlProductDetails { product, kind })
    }

    async fn load_kind(&self, product_id: Uuid) -> Result<ControlKind, ServiceError> {
        let db = self.db_pool.as_ref();

        if let Some(fungus) = fungus_control::Entity::find_by_id(product_id).one(db).await? {
            return Ok(ControlKind::Fungus(fungus));
        }
        if let Some(pest) = pest_control::Entity::find_by_id(product_id).one(db).await? {
            return Ok(ControlKind::Pest(pest));
        }
        if let Some(fertilizer) = fertilizer_control::Entity::find_by_id(product_id)
            .one(db)
            .await?
        {
            return Ok(ControlKind::Fertilizer(fertilizer));
        }
        Ok(ControlKind::Generic)
    }

    /// Lists every base product ordered by name
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<control_product::Model>, ServiceError> {
        let products = control_product::Entity::find()
            .order_by_asc(control_product::Column::Name)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(products)
    }

    /// Deletes a product, its subtype row and every application of it
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        let product = control_product::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Control product", product_id))?;
        product.delete(db).await?;
        info!(product_id = %product_id, "Control product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawal_period_only_applies_to_fungus_and_pest() {
        let pest = ControlKind::Pest(pest_control::Model {
            product_id: Uuid::nil(),
            withdrawal_period_days: 21,
        });
        assert_eq!(pest.withdrawal_period_days(), Some(21));
        assert_eq!(pest.label(), "pest");

        let fertilizer = ControlKind::Fertilizer(fertilizer_control::Model {
            product_id: Uuid::nil(),
            application_date: None,
        });
        assert_eq!(fertilizer.withdrawal_period_days(), None);
        assert_eq!(ControlKind::Generic.withdrawal_period_days(), None);
    }
}
