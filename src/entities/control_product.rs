use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Catalog entry shared by every control product. Fungus, pest and
/// fertilizer controls keep their own fields in a subtype table keyed by
/// this row's id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "control_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Agricultural registry number, when the product has one.
    pub registration_number: Option<String>,
    pub name: String,
    /// Days between applications, always positive.
    pub application_frequency_days: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::fungus_control::Entity")]
    FungusControl,
    #[sea_orm(has_one = "super::pest_control::Entity")]
    PestControl,
    #[sea_orm(has_one = "super::fertilizer_control::Entity")]
    FertilizerControl,
    #[sea_orm(has_many = "super::labor_product::Entity")]
    LaborProducts,
}

impl Related<super::fungus_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FungusControl.def()
    }
}

impl Related<super::pest_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PestControl.def()
    }
}

impl Related<super::fertilizer_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FertilizerControl.def()
    }
}

impl Related<super::labor_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaborProducts.def()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
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
