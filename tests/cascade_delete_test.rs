mod common;

use rust_decimal_macros::dec;

use agro_registry::{commands::labor_products::CreateLaborProductCommand, entities};
use common::{date, TestApp};

async fn apply(app: &TestApp, labor_id: uuid::Uuid, product_id: uuid::Uuid) {
    app.services()
        .labors
        .add_product(CreateLaborProductCommand {
            labor_id: Some(labor_id),
            product_id: Some(product_id),
            quantity: Some(dec!(1.00)),
            application_date: Some(date(2024, 7, 1)),
        })
        .await
        .expect("failed to add labor product");
}

#[tokio::test]
async fn deleting_a_producer_removes_everything_below_it() {
    let app = TestApp::new().await;
    let (producer, farm, nursery) = app.create_nursery_chain().await;
    let second_nursery = app.create_nursery(farm.id, "N-02").await;
    let labor = app.create_labor(nursery.id, date(2024, 7, 1)).await;
    app.create_labor(second_nursery.id, date(2024, 7, 2)).await;
    let fungicide = app.create_fungicide("Difenoconazole").await;
    apply(&app, labor.id, fungicide.product.id).await;

    let other = app.create_producer("CC-OTHER").await;
    let other_farm = app.create_farm(other.id, "CAT-OTHER").await;

    app.services()
        .producers
        .delete_producer(producer.id)
        .await
        .unwrap();

    assert_eq!(app.count::<entities::Producer>().await, 1);
    assert_eq!(app.count::<entities::Farm>().await, 1);
    assert_eq!(app.count::<entities::Nursery>().await, 0);
    assert_eq!(app.count::<entities::Labor>().await, 0);
    assert_eq!(app.count::<entities::LaborProduct>().await, 0);
    // Catalog entries are not owned by producers.
    assert_eq!(app.count::<entities::ControlProduct>().await, 1);
    assert!(app
        .services()
        .farms
        .get_farm(other_farm.id)
        .await
        .is_ok());
}

#[tokio::test]
async fn deleting_a_product_removes_its_applications_but_not_the_labor() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 7, 1)).await;
    let removed = app.create_fungicide("Tebuconazole").await;
    let kept = app.create_fungicide("Captan").await;
    apply(&app, labor.id, removed.product.id).await;
    apply(&app, labor.id, kept.product.id).await;

    app.services()
        .control_products
        .delete_product(removed.product.id)
        .await
        .unwrap();

    assert_eq!(app.count::<entities::Labor>().await, 1);
    assert_eq!(app.count::<entities::FungusControl>().await, 1);
    let remaining = app
        .services()
        .labors
        .list_products_for_labor(labor.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product.id, kept.product.id);
}

#[tokio::test]
async fn deleting_a_labor_removes_its_applications() {
    let app = TestApp::new().await;
    let (_, _, nursery) = app.create_nursery_chain().await;
    let labor = app.create_labor(nursery.id, date(2024, 7, 1)).await;
    let fungicide = app.create_fungicide("Tebuconazole").await;
    apply(&app, labor.id, fungicide.product.id).await;

    app.services().labors.delete_labor(labor.id).await.unwrap();

    assert_eq!(app.count::<entities::LaborProduct>().await, 0);
    assert_eq!(app.count::<entities::ControlProduct>().await, 1);
}
