//! Raw HTTP access to the portal backend

mod client;

pub use client::PortalClient;
