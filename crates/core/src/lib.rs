//! Airdrop Core - Shared data models, types, configuration and errors

pub mod config;
pub mod errors;
pub mod models;
pub mod types;

pub use config::{ApiPaths, PortalConfig, RewardFormat};
pub use errors::{Error, ErrorKind, Result};
pub use models::*;
pub use types::*;
