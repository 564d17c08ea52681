pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod list;
pub mod models;
pub mod services;
pub mod types;

#[cfg(test)]
pub mod testing;
