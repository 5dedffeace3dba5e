//! Data models for airdrop portal entities

mod api;
mod claim;
mod registration;
mod stake;
mod window;

pub use api::*;
pub use claim::*;
pub use registration::*;
pub use stake::*;
pub use window::*;
