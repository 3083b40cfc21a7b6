mod common;

use agro_registry::{entities, metrics, seed::seed_demo_data};
use common::TestApp;

#[tokio::test]
async fn seeding_creates_a_connected_data_set() {
    let app = TestApp::new().await;

    let summary = seed_demo_data(app.services()).await.unwrap();

    assert_eq!(summary.producers, 1);
    assert_eq!(summary.products, 3);
    assert_eq!(app.count::<entities::Producer>().await, 1);
    assert_eq!(app.count::<entities::ControlProduct>().await, 3);
    assert_eq!(app.count::<entities::FungusControl>().await, 1);
    assert_eq!(app.count::<entities::PestControl>().await, 1);
    assert_eq!(app.count::<entities::FertilizerControl>().await, 1);
    assert_eq!(
        app.count::<entities::LaborProduct>().await,
        summary.labor_products as u64
    );

    assert!(metrics::created_count("labor_product") >= 2);
    assert!(metrics::render().contains("records_created_total"));

    // Natural keys are unique, so a second run is refused.
    assert!(seed_demo_data(app.services()).await.is_err());
}
