//! Domain entities

pub mod account;

pub use account::{Account, Sex};
