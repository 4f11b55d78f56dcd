//! Entity module - Contains all SeaORM entity definitions for the hosted schema.
//! Each entity has a Model struct for the typed row and an Entity struct for queries.
//! Only distributors and machines have business operations; the rest are read
//! for joins, verification and diagnostics.

pub mod assignment;
pub mod distributor;
pub mod inventory_stock;
pub mod machine;
pub mod order;
pub mod retailer;
pub mod service_provider;

// Re-export specific types to avoid conflicts
pub use assignment::{
    AssignmentStatus, Column as AssignmentColumn, Entity as Assignment, Model as AssignmentModel,
};
pub use distributor::{
    Column as DistributorColumn, DistributorStatus, Entity as Distributor,
    Model as DistributorModel,
};
pub use inventory_stock::{
    Column as InventoryStockColumn, Entity as InventoryStock, Model as InventoryStockModel,
};
pub use machine::{
    Column as MachineColumn, Entity as Machine, MachineStatus, MachineType, Model as MachineModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use retailer::{Column as RetailerColumn, Entity as Retailer, Model as RetailerModel};
pub use service_provider::{
    Column as ServiceProviderColumn, Entity as ServiceProvider, Model as ServiceProviderModel,
};
