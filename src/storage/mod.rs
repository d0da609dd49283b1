pub mod config;
pub mod menu;
pub mod store;

pub use config::{Config, ConfigError};
pub use menu::MenuStore;
pub use store::{AppointmentStore, StoreError};
