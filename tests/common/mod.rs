#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use uuid::Uuid;

use agro_registry::{
    commands::{
        control_products::{ControlProductFields, CreateFungusControlCommand},
        farms::CreateFarmCommand,
        labors::CreateLaborCommand,
        nurseries::CreateNurseryCommand,
        producers::CreateProducerCommand,
    },
    config::AppConfig,
    db::{self, DbPool},
    entities::{farm, labor, nursery, producer, LaborType},
    services::{control_products::ControlProductDetails, RegistryServices},
    AppState,
};

/// Helper harness backed by a private in-memory SQLite database.
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with a freshly migrated schema.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:", "test");
        cfg.auto_migrate = true;
        // Every connection to `sqlite::memory:` is its own database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let state = AppState::connect(cfg)
            .await
            .expect("failed to create test database");

        Self { state }
    }

    pub fn services(&self) -> &RegistryServices {
        &self.state.services
    }

    pub fn db(&self) -> Arc<DbPool> {
        self.state.db.clone()
    }

    /// Row count of an entity's table.
    pub async fn count<E>(&self) -> u64
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        db::count_rows::<E>(self.state.db.as_ref())
            .await
            .expect("failed to count rows")
    }

    pub async fn create_producer(&self, document_number: &str) -> producer::Model {
        self.services()
            .producers
            .create_producer(producer_command(document_number))
            .await
            .expect("failed to create producer")
    }

    pub async fn create_farm(&self, producer_id: Uuid, cadastral_number: &str) -> farm::Model {
        self.services()
            .farms
            .create_farm(CreateFarmCommand {
                producer_id: Some(producer_id),
                cadastral_number: Some(cadastral_number.to_string()),
                municipality: Some("Santa Rosa de Cabal".to_string()),
            })
            .await
            .expect("failed to create farm")
    }

    pub async fn create_nursery(&self, farm_id: Uuid, code: &str) -> nursery::Model {
        self.services()
            .nurseries
            .create_nursery(CreateNurseryCommand {
                farm_id: Some(farm_id),
                code: Some(code.to_string()),
                crop_type: Some("Avocado".to_string()),
            })
            .await
            .expect("failed to create nursery")
    }

    pub async fn create_fungicide(&self, name: &str) -> ControlProductDetails {
        self.services()
            .control_products
            .create_fungus_control(CreateFungusControlCommand {
                base: product_fields(name),
                withdrawal_period_days: Some(14),
                fungus_name: Some("Phytophthora cinnamomi".to_string()),
            })
            .await
            .expect("failed to create fungus control")
    }

    pub async fn create_labor(&self, nursery_id: Uuid, date: NaiveDate) -> labor::Model {
        self.services()
            .labors
            .create_labor(CreateLaborCommand {
                nursery_id: Some(nursery_id),
                date: Some(date),
                description: None,
                labor_type: Some(LaborType::FungusApplication),
            })
            .await
            .expect("failed to create labor")
    }

    /// Producer -> farm -> nursery chain used by most tests.
    pub async fn create_nursery_chain(&self) -> (producer::Model, farm::Model, nursery::Model) {
        let producer = self.create_producer("CC-900100").await;
        let farm = self.create_farm(producer.id, "CAT-0001").await;
        let nursery = self.create_nursery(farm.id, "N-01").await;
        (producer, farm, nursery)
    }
}

pub fn producer_command(document_number: &str) -> CreateProducerCommand {
    CreateProducerCommand {
        document_type: Some("CC".to_string()),
        document_number: Some(document_number.to_string()),
        name: Some("Jorge".to_string()),
        surname: Some("Restrepo".to_string()),
        phone: None,
        email: Some("jorge@example.com".to_string()),
    }
}

pub fn product_fields(name: &str) -> ControlProductFields {
    ControlProductFields {
        registration_number: Some("ICA-1001".to_string()),
        name: Some(name.to_string()),
        application_frequency_days: Some(15),
        value: Some(dec!(35000.00)),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
