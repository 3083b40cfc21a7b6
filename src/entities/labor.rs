use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of work carried out during a labor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::AsRefStr,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LaborType {
    #[sea_orm(string_value = "FUNGUS_APPLICATION")]
    FungusApplication,
    #[sea_orm(string_value = "PEST_APPLICATION")]
    PestApplication,
    #[sea_orm(string_value = "FERTILIZER_APPLICATION")]
    FertilizerApplication,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

/// Dated work or application event at a nursery. Listed newest first.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nursery_id: Uuid,
    pub date: NaiveDate,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "type")]
    pub labor_type: LaborType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::nursery::Entity",
        from = "Column::NurseryId",
        to = "super::nursery::Column::Id",
        on_delete = "Cascade"
    )]
    Nursery,
    #[sea_orm(has_many = "super::labor_product::Entity")]
    LaborProducts,
}

impl Related<super::nursery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nursery.def()
    }
}

impl Related<super::labor_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaborProducts.def()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Labor {} - {}", self.labor_type.as_ref(), self.date)
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
