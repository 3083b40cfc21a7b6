mod common;

use assert_matches::assert_matches;
use rstest::rstest;
use rust_decimal_macros::dec;
use uuid::Uuid;

use agro_registry::{
    commands::{labor_products::CreateLaborProductCommand, labors::CreateLaborCommand},
    entities::{self, LaborType},
    errors::ServiceError,
};
use common::{date, TestApp};

#[tokio::test]
async fn labors_are_listed_newest_first() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;

    for day in [date(2024, 1, 10), date(2024, 3, 5), date(2024, 2, 20)] {
        app.create_labor(nursery.id, day).await;
    }

    let dates: Vec<_> = app
        .services()
        .labors
        .list_labors_for_nursery(nursery.id)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.date)
        .collect();
    assert_eq!(dates, [date(2024, 3, 5), date(2024, 2, 20), date(2024, 1, 10)]);
}

#[tokio::test]
async fn labor_round_trips_type_and_description() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;

    let created = app
        .services()
        .labors
        .create_labor(CreateLaborCommand {
            nursery_id: Some(nursery.id),
            date: Some(date(2024, 5, 2)),
            description: Some("  Foliar feeding  ".to_string()),
            labor_type: Some(LaborType::FertilizerApplication),
        })
        .await
        .unwrap();

    let stored = app.services().labors.get_labor(created.id).await.unwrap();
    assert_eq!(stored.labor_type, LaborType::FertilizerApplication);
    assert_eq!(stored.description.as_deref(), Some("Foliar feeding"));
    assert_eq!(stored.to_string(), "Labor FERTILIZER_APPLICATION - 2024-05-02");
}

#[tokio::test]
async fn labor_requires_nursery_date_and_type() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .labors
        .create_labor(CreateLaborCommand::default())
        .await
        .unwrap_err();

    assert_eq!(err.invalid_fields(), ["date", "labor_type", "nursery_id"]);
    assert_eq!(app.count::<entities::Labor>().await, 0);
}

#[tokio::test]
async fn applied_products_are_paired_with_their_product() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 6, 1)).await;
    let fungicide = app.create_fungicide("Propiconazole").await;

    app.services()
        .labors
        .add_product(CreateLaborProductCommand {
            labor_id: Some(labor.id),
            product_id: Some(fungicide.product.id),
            quantity: Some(dec!(2.50)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap();

    let applied = app
        .services()
        .labors
        .list_products_for_labor(labor.id)
        .await
        .unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].product.id, fungicide.product.id);
    assert_eq!(applied[0].labor_product.quantity, dec!(2.50));
    assert_eq!(applied[0].to_string(), "Propiconazole applied on 2024-06-01");

    let applications = app
        .services()
        .labors
        .list_labors_for_product(fungicide.product.id)
        .await
        .unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].labor_id, labor.id);
}

fn labor_product_command() -> CreateLaborProductCommand {
    CreateLaborProductCommand {
        labor_id: Some(Uuid::new_v4()),
        product_id: Some(Uuid::new_v4()),
        quantity: Some(dec!(1.25)),
        application_date: Some(date(2024, 6, 1)),
    }
}

#[rstest]
#[case::labor("labor_id", CreateLaborProductCommand { labor_id: None, ..labor_product_command() })]
#[case::product("product_id", CreateLaborProductCommand { product_id: None, ..labor_product_command() })]
#[case::quantity("quantity", CreateLaborProductCommand { quantity: None, ..labor_product_command() })]
#[case::application_date("application_date", CreateLaborProductCommand { application_date: None, ..labor_product_command() })]
#[tokio::test]
async fn rejects_incomplete_labor_product_before_writing(
    #[case] field: &str,
    #[case] command: CreateLaborProductCommand,
) {
    let app = TestApp::new().await;

    let err = app.services().labors.add_product(command).await.unwrap_err();

    assert_matches!(err, ServiceError::ValidationError { .. });
    assert_eq!(err.invalid_fields(), [field]);
    assert_eq!(app.count::<entities::LaborProduct>().await, 0);
}

#[tokio::test]
async fn zero_quantity_is_recorded() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 6, 1)).await;
    let fungicide = app.create_fungicide("Propiconazole").await;

    let row = app
        .services()
        .labors
        .add_product(CreateLaborProductCommand {
            labor_id: Some(labor.id),
            product_id: Some(fungicide.product.id),
            quantity: Some(dec!(0)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap();

    assert_eq!(row.quantity, dec!(0));
    assert_eq!(app.count::<entities::LaborProduct>().await, 1);
}

#[tokio::test]
async fn labor_product_without_labor_or_product_is_rejected() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 6, 1)).await;
    let fungicide = app.create_fungicide("Propiconazole").await;
    let service = &app.services().labors;

    let err = service
        .add_product(CreateLaborProductCommand {
            labor_id: None,
            product_id: Some(fungicide.product.id),
            quantity: Some(dec!(1)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError { .. });
    assert_eq!(err.invalid_fields(), ["labor_id"]);

    let err = service
        .add_product(CreateLaborProductCommand {
            labor_id: Some(labor.id),
            product_id: None,
            quantity: Some(dec!(1)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), ["product_id"]);

    assert_eq!(app.count::<entities::LaborProduct>().await, 0);
}

#[tokio::test]
async fn labor_product_for_unknown_labor_is_an_integrity_error() {
    let app = TestApp::new().await;
    let fungicide = app.create_fungicide("Propiconazole").await;

    let err = app
        .services()
        .labors
        .add_product(CreateLaborProductCommand {
            labor_id: Some(Uuid::new_v4()),
            product_id: Some(fungicide.product.id),
            quantity: Some(dec!(1)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::IntegrityError(_));
}

#[tokio::test]
async fn removing_an_application_keeps_labor_and_product() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 6, 1)).await;
    let fungicide = app.create_fungicide("Propiconazole").await;

    let row = app
        .services()
        .labors
        .add_product(CreateLaborProductCommand {
            labor_id: Some(labor.id),
            product_id: Some(fungicide.product.id),
            quantity: Some(dec!(0.75)),
            application_date: Some(date(2024, 6, 1)),
        })
        .await
        .unwrap();

    app.services()
        .labors
        .delete_labor_product(row.id)
        .await
        .unwrap();

    assert_eq!(app.count::<entities::LaborProduct>().await, 0);
    assert_eq!(app.count::<entities::Labor>().await, 1);
    assert_eq!(app.count::<entities::ControlProduct>().await, 1);
}
