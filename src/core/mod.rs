//! Core clients, models, configuration and errors

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod speech;
