//! Infrastructure layer: key-value store gateway, backends, configuration.

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError, GetUsersMode, StoreBackend};
pub use store::{
    AttributeValue, GatewayError, InMemoryItemStore, Item, ItemStore, PostgresItemStore,
    RecordError, ScanFilter, StoreError, StoreGateway,
};
