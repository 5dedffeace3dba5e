//! Airdrop Engine - Portal rules, history aggregation and claim workflows

pub mod executor;
pub mod history;
pub mod outcome;
pub mod ports;
pub mod rules;
pub mod session;
pub mod workflows;

#[cfg(test)]
mod testing;

pub use executor::{InFlightGuard, Operation};
pub use history::{load_history, HistorySnapshot};
pub use outcome::{Alert, AlertKind, Effect, Outcome, PortalEvent};
pub use session::PortalSession;
pub use workflows::{AirdropPortal, ClaimContext, RegistrationContext};
