//! sea-orm entities for the registry schema.
//!
//! Ownership chain: producer -> farm -> nursery -> labor -> labor_product.
//! Control products hang off `control_products`, with one optional subtype
//! row in `fungus_controls`, `pest_controls` or `fertilizer_controls`.

pub mod control_product;
pub mod farm;
pub mod fertilizer_control;
pub mod fungus_control;
pub mod labor;
pub mod labor_product;
pub mod nursery;
pub mod pest_control;
pub mod producer;

pub use control_product::Entity as ControlProduct;
pub use farm::Entity as Farm;
pub use fertilizer_control::Entity as FertilizerControl;
pub use fungus_control::Entity as FungusControl;
pub use labor::{Entity as Labor, LaborType};
pub use labor_product::Entity as LaborProduct;
pub use nursery::Entity as Nursery;
pub use pest_control::Entity as PestControl;
pub use producer::Entity as Producer;
