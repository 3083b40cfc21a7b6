//! Per-aggregate services. Writes go through the command objects in
//! [`crate::commands`]; services add lookups, listings and deletes.

pub mod control_products;
pub mod farms;
pub mod labors;
pub mod nurseries;
pub mod producers;

use crate::db::DbPool;
use std::sync::Arc;

pub use control_products::ControlProductService;
pub use farms::FarmService;
pub use labors::LaborService;
pub use nurseries::NurseryService;
pub use producers::ProducerService;

/// Bundle of every service sharing one pool.
#[derive(Clone)]
pub struct RegistryServices {
    pub producers: Arc<ProducerService>,
    pub farms: Arc<FarmService>,
    pub nurseries: Arc<NurseryService>,
    pub control_products: Arc<ControlProductService>,
    pub labors: Arc<LaborService>,
}

impl RegistryServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            producers: Arc::new(ProducerService::new(db_pool.clone())),
            farms: Arc::new(FarmService::new(db_pool.clone())),
            nurseries: Arc::new(NurseryService::new(db_pool.clone())),
            control_products: Arc::new(ControlProductService::new(db_pool.clone())),
            labors: Arc::new(LaborService::new(db_pool)),
        }
    }
}
