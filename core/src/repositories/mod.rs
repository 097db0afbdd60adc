//! Repository traits defining persistence contracts
//!
//! Implementations live in the infrastructure layer; an in-memory mock is
//! exported for tests.

pub mod account;

pub use account::{AccountRepository, MockAccountRepository};
