//! Request and response data transfer objects

pub mod account;

pub use account::{
    AccountResponse, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    ResetPasswordRequest, SendCodeQuery,
};
