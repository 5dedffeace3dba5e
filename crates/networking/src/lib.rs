//! Airdrop Networking - HTTP client and backend API wrappers

pub mod api;
pub mod http;

pub use api::AirdropBackend;
pub use http::PortalClient;
