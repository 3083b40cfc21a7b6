//! Demo data: one producer with a farm, a nursery, one product of each
//! kind and a labor applying two of them.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing::info;

use crate::commands::{
    control_products::{
        ControlProductFields, CreateFertilizerControlCommand, CreateFungusControlCommand,
        CreatePestControlCommand,
    },
    farms::CreateFarmCommand,
    labor_products::CreateLaborProductCommand,
    labors::CreateLaborCommand,
    nurseries::CreateNurseryCommand,
    producers::CreateProducerCommand,
};
use crate::entities::LaborType;
use crate::errors::ServiceError;
use crate::services::RegistryServices;

/// Counts of the rows created by [`seed_demo_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub producers: usize,
    pub farms: usize,
    pub nurseries: usize,
    pub products: usize,
    pub labors: usize,
    pub labor_products: usize,
}

pub async fn seed_demo_data(services: &RegistryServices) -> Result<SeedSummary, ServiceError> {
    let mut summary = SeedSummary::default();

    info!("Creating producer...");
    let producer = services
        .producers
        .create_producer(CreateProducerCommand {
            document_type: Some("CC".into()),
            document_number: Some("1088245671".into()),
            name: Some("Marta".into()),
            surname: Some("Ospina".into()),
            phone: Some("+57 310 555 0147".into()),
            email: Some("marta.ospina@example.com".into()),
        })
        .await?;
    summary.producers += 1;

    info!("Creating farm and nursery...");
    let farm = services
        .farms
        .create_farm(CreateFarmCommand {
            producer_id: Some(producer.id),
            cadastral_number: Some("66001-00-02-0013".into()),
            municipality: Some("Pereira".into()),
        })
        .await?;
    summary.farms += 1;

    let nursery = services
        .nurseries
        .create_nursery(CreateNurseryCommand {
            farm_id: Some(farm.id),
            code: Some("VIV-01".into()),
            crop_type: Some("Coffee".into()),
        })
        .await?;
    summary.nurseries += 1;

    info!("Creating control products...");
    let fungicide = services
        .control_products
        .create_fungus_control(CreateFungusControlCommand {
            base: ControlProductFields {
                registration_number: Some("ICA-4521".into()),
                name: Some("Cyproconazole 10 SL".into()),
                application_frequency_days: Some(30),
                value: Some(dec!(98500.00)),
            },
            withdrawal_period_days: Some(14),
            fungus_name: Some("Hemileia vastatrix".into()),
        })
        .await?;
    let pesticide = services
        .control_products
        .create_pest_control(CreatePestControlCommand {
            base: ControlProductFields {
                registration_number: Some("ICA-3310".into()),
                name: Some("Beauveria bassiana WP".into()),
                application_frequency_days: Some(21),
                value: Some(dec!(42000.00)),
            },
            withdrawal_period_days: Some(0),
        })
        .await?;
    services
        .control_products
        .create_fertilizer_control(CreateFertilizerControlCommand {
            base: ControlProductFields {
                registration_number: None,
                name: Some("Urea 46%".into()),
                application_frequency_days: Some(90),
                value: Some(dec!(150000.00)),
            },
            application_date: NaiveDate::from_ymd_opt(2024, 2, 1),
        })
        .await?;
    summary.products += 3;

    info!("Creating labor...");
    let date = NaiveDate::from_ymd_opt(2024, 3, 15);
    let labor = services
        .labors
        .create_labor(CreateLaborCommand {
            nursery_id: Some(nursery.id),
            date,
            description: Some("Rust and borer prevention".into()),
            labor_type: Some(LaborType::FungusApplication),
        })
        .await?;
    summary.labors += 1;

    for (product_id, quantity) in [
        (fungicide.product.id, dec!(0.75)),
        (pesticide.product.id, dec!(1.20)),
    ] {
        services
            .labors
            .add_product(CreateLaborProductCommand {
                labor_id: Some(labor.id),
                product_id: Some(product_id),
                quantity: Some(quantity),
                application_date: date,
            })
            .await?;
        summary.labor_products += 1;
    }

    info!(?summary, "Demo data created");
    Ok(summary)
}
