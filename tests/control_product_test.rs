mod common;

use assert_matches::assert_matches;
use rstest::rstest;
use rust_decimal_macros::dec;

use agro_registry::{
    commands::control_products::{
        ControlProductFields, CreateControlProductCommand, CreateFertilizerControlCommand,
        CreateFungusControlCommand, CreatePestControlCommand,
    },
    entities,
    errors::ServiceError,
    services::control_products::ControlKind,
};
use common::{date, product_fields, TestApp};

#[tokio::test]
async fn fungus_control_is_also_a_base_product() {
    let app = TestApp::new().await;
    let created = app.create_fungicide("Fosetyl-Al 80 WG").await;

    let details = app
        .services()
        .control_products
        .get_product(created.product.id)
        .await
        .unwrap();

    assert_eq!(details.product.name, "Fosetyl-Al 80 WG");
    assert_eq!(details.product.application_frequency_days, 15);
    assert_eq!(details.to_string(), "Fosetyl-Al 80 WG");
    assert_matches!(details.kind, ControlKind::Fungus(ref fungus) => {
        assert_eq!(fungus.product_id, created.product.id);
        assert_eq!(fungus.withdrawal_period_days, 14);
        assert_eq!(fungus.fungus_name, "Phytophthora cinnamomi");
    });
    assert_eq!(app.count::<entities::ControlProduct>().await, 1);
    assert_eq!(app.count::<entities::FungusControl>().await, 1);
}

#[tokio::test]
async fn each_specialization_reads_back_as_its_kind() {
    let app = TestApp::new().await;
    let service = &app.services().control_products;

    let pest = service
        .create_pest_control(CreatePestControlCommand {
            base: product_fields("Spinetoram"),
            withdrawal_period_days: Some(7),
        })
        .await
        .unwrap();
    let fertilizer = service
        .create_fertilizer_control(CreateFertilizerControlCommand {
            base: product_fields("DAP 18-46-0"),
            application_date: Some(date(2024, 4, 1)),
        })
        .await
        .unwrap();
    let generic = service
        .create_product(CreateControlProductCommand {
            base: ControlProductFields {
                registration_number: None,
                value: None,
                ..product_fields("Mineral oil")
            },
        })
        .await
        .unwrap();

    let pest = service.get_product(pest.product.id).await.unwrap();
    assert_matches!(pest.kind, ControlKind::Pest(ref p) if p.withdrawal_period_days == 7);

    let fertilizer = service.get_product(fertilizer.product.id).await.unwrap();
    assert_matches!(
        fertilizer.kind,
        ControlKind::Fertilizer(ref f) if f.application_date == Some(date(2024, 4, 1))
    );

    let generic = service.get_product(generic.id).await.unwrap();
    assert_eq!(generic.kind, ControlKind::Generic);
    assert_eq!(generic.product.registration_number, None);
    assert_eq!(generic.product.value, None);

    assert_eq!(app.count::<entities::ControlProduct>().await, 3);
}

#[rstest]
#[case::zero(0)]
#[case::negative(-5)]
#[tokio::test]
async fn non_positive_frequency_is_rejected(#[case] days: i32) {
    let app = TestApp::new().await;

    let err = app
        .services()
        .control_products
        .create_fungus_control(CreateFungusControlCommand {
            base: ControlProductFields {
                application_frequency_days: Some(days),
                ..product_fields("Copper oxychloride")
            },
            withdrawal_period_days: Some(3),
            fungus_name: Some("Mycena citricolor".to_string()),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::ValidationError { .. });
    assert_eq!(err.invalid_fields(), ["application_frequency_days"]);
    assert_eq!(app.count::<entities::ControlProduct>().await, 0);
    assert_eq!(app.count::<entities::FungusControl>().await, 0);
}

#[tokio::test]
async fn missing_subtype_field_leaves_no_base_row() {
    let app = TestApp::new().await;

    let err = app
        .services()
        .control_products
        .create_pest_control(CreatePestControlCommand {
            base: product_fields("Chlorpyrifos"),
            withdrawal_period_days: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.invalid_fields(), ["withdrawal_period_days"]);
    assert_eq!(app.count::<entities::ControlProduct>().await, 0);
}

#[tokio::test]
async fn value_keeps_two_decimal_places() {
    let app = TestApp::new().await;
    let service = &app.services().control_products;

    let created = service
        .create_product(CreateControlProductCommand {
            base: ControlProductFields {
                value: Some(dec!(1250.50)),
                ..product_fields("Kaolin")
            },
        })
        .await
        .unwrap();
    let stored = service.get_product(created.id).await.unwrap();
    assert_eq!(stored.product.value, Some(dec!(1250.50)));

    let free_sample = service
        .create_product(CreateControlProductCommand {
            base: ControlProductFields {
                value: Some(dec!(0)),
                ..product_fields("Kaolin sample")
            },
        })
        .await
        .unwrap();
    assert_eq!(free_sample.value, Some(dec!(0)));

    let err = service
        .create_product(CreateControlProductCommand {
            base: ControlProductFields {
                value: Some(dec!(10.999)),
                ..product_fields("Kaolin")
            },
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), ["value"]);
}

#[tokio::test]
async fn products_are_listed_by_name() {
    let app = TestApp::new().await;
    for name in ["Zineb", "Azoxystrobin", "Mancozeb"] {
        app.create_fungicide(name).await;
    }

    let names: Vec<String> = app
        .services()
        .control_products
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Azoxystrobin", "Mancozeb", "Zineb"]);
}
