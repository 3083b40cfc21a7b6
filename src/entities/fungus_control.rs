use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fungus_controls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    /// Days to wait after application before harvest.
    pub withdrawal_period_days: i32,
    pub fungus_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::control_product::Entity",
        from = "Column::ProductId",
        to = "super::control_product::Column::Id",
        on_delete = "Cascade"
    )]
    ControlProduct,
}

impl Related<super::control_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ControlProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
