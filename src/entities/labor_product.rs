use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantity of a control product applied during a labor.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labor_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub labor_id: Uuid,
    pub product_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantity: Decimal,
    pub application_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::labor::Entity",
        from = "Column::LaborId",
        to = "super::labor::Column::Id",
        on_delete = "Cascade"
    )]
    Labor,
    #[sea_orm(
        belongs_to = "super::control_product::Entity",
        from = "Column::ProductId",
        to = "super::control_product::Column::Id",
        on_delete = "Cascade"
    )]
    ControlProduct,
}

impl Related<super::labor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labor.def()
    }
}

impl Related<super::control_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ControlProduct.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            active_model.created_at = Set(now);
        }

        active_model.updated_at = Set(Some(now));
        Ok(active_model)
    }
}
