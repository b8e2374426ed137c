//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the browser client
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: access token signing configuration

pub mod cors;
pub mod database;
pub mod jwt;
