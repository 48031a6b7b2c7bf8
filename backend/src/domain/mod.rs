pub mod auth;
pub mod business;
