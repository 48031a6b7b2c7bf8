pub mod auth;
pub mod businesses;
