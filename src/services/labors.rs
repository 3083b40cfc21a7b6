use crate::{
    commands::labor_products::CreateLaborProductCommand,
    commands::labors::CreateLaborCommand,
    commands::Command,
    db::DbPool,
    entities::{control_product, labor, labor_product},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// A labor product row paired with the product it applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedProduct {
    pub labor_product: labor_product::Model,
    pub product: control_product::Model,
}

impl fmt::Display for AppliedProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} applied on {}",
            self.product.name, self.labor_product.application_date
        )
    }
}

/// Service for managing labors and the products applied during them
#[derive(Clone)]
pub struct LaborService {
    db_pool: Arc<DbPool>,
}

impl LaborService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Records a labor at a nursery
    #[instrument(skip(self))]
    pub async fn create_labor(
        &self,
        command: CreateLaborCommand,
    ) -> Result<labor::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Lists a nursery's labors, most recent first
    #[instrument(skip(self))]
    pub async fn list_labors_for_nursery(
        &self,
        nursery_id: Uuid,
    ) -> Result<Vec<labor::Model>, ServiceError> {
        let labors = labor::Entity::find()
            .filter(labor::Column::NurseryId.eq(nursery_id))
            .order_by_desc(labor::Column::Date)
            .order_by_desc(labor::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(labors)
    }

    #[instrument(skip(self))]
    pub async fn get_labor(&self, labor_id: Uuid) -> Result<labor::Model, ServiceError> {
        labor::Entity::find_by_id(labor_id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found("Labor", labor_id))
    }

    /// Deletes a labor and its applied products
    #[instrument(skip(self))]
    pub async fn delete_labor(&self, labor_id: Uuid) -> Result<(), ServiceError> {
        let labor = self.get_labor(labor_id).await?;
        labor.delete(self.db_pool.as_ref()).await?;
        info!(labor_id = %labor_id, "Labor deleted");
        Ok(())
    }

    /// Records a product applied during a labor
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        command: CreateLaborProductCommand,
    ) -> Result<labor_product::Model, ServiceError> {
        command.execute(self.db_pool.clone()).await
    }

    /// Lists the products applied during a labor, most recent application first
    #[instrument(skip(self))]
    pub async fn list_products_for_labor(
        &self,
        labor_id: Uuid,
    ) -> Result<Vec<AppliedProduct>, ServiceError> {
        let rows = labor_product::Entity::find()
            .filter(labor_product::Column::LaborId.eq(labor_id))
            .order_by_desc(labor_product::Column::ApplicationDate)
            .find_also_related(control_product::Entity)
            .all(self.db_pool.as_ref())
            .await?;

        rows.into_iter()
            .map(|(labor_product, product)| {
                let product = product.ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "labor product {} references a missing control product",
                        labor_product.id
                    ))
                })?;
                Ok(AppliedProduct {
                    labor_product,
                    product,
                })
            })
            .collect()
    }

    /// Lists every application of a product, most recent first
    #[instrument(skip(self))]
    pub async fn list_labors_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<labor_product::Model>, ServiceError> {
        let rows = labor_product::Entity::find()
            .filter(labor_product::Column::ProductId.eq(product_id))
            .order_by_desc(labor_product::Column::ApplicationDate)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn delete_labor_product(&self, labor_product_id: Uuid) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        let row = labor_product::Entity::find_by_id(labor_product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Labor product", labor_product_id))?;
        row.delete(db).await?;
        info!(labor_product_id = %labor_product_id, "Labor product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn applied_product_display_names_product_and_date() {
        let product = control_product::Model {
            id: Uuid::new_v4(),
            registration_number: None,
            name: "Urea 46%".into(),
            application_frequency_days: 30,
            value: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let applied = AppliedProduct {
            labor_product: labor_product::Model {
                id: Uuid::new_v4(),
                labor_id: Uuid::new_v4(),
                product_id: product.id,
                quantity: dec!(2.50),
                application_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                created_at: Utc::now(),
                updated_at: None,
            },
            product,
        };
        assert_eq!(applied.to_string(), "Urea 46% applied on 2024-06-02");
    }
}
