//! Shared configuration, entity and company-store types for repscope.

mod app_config;
mod config;
mod entity;
mod store;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entity::{AuxiliaryFields, EntityContext, ValidationError};
pub use store::{CompanyStore, InMemoryCompanyStore, OpportunityFilter, StoreError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
