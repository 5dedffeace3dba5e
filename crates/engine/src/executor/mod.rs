//! Submission bookkeeping shared by the workflows

mod inflight;

pub use inflight::{
    GuardViolation, InFlightGuard, InFlightToken, Operation, ALREADY_CLAIMED_MESSAGE, CLAIM_PENDING_MESSAGE,
};
