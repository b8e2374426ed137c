//! Feature modules.
//!
//! Each module follows the same structure: `model.rs` (entities and DTOs),
//! `service.rs` (business logic over the database pool), `controller.rs`
//! (HTTP handlers) and `router.rs` (route wiring).

pub mod alerts;
pub mod auth;
pub mod campaigns;
pub mod notices;
pub mod reports;
pub mod users;
pub mod visitors;
