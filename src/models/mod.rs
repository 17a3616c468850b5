//! Domain models for the balance service.

pub mod balance;

pub use balance::{BalanceResponse, UpdateBalanceRequest};
