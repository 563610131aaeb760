//! Clients Module
//!
//! Owner-scoped management of client resources. A client is created, read
//! and deleted only through the owner its caller's credential resolves to.
//!
//! ## Architecture
//!
//! ### Contract Layer (`clients-sdk`)
//! - `ClientsClientV1` trait, `Client` / `NewClient` models, `ClientsError`
//!
//! ### API Layer (`clients::api`)
//! - `rest/` - axum routes, handlers, DTOs, and the `ClientsError` to
//!   RFC 9457 Problem mapping
//! - **Rule:** the domain layer never imports `api::*`
//!
//! ### Domain Layer (`clients::domain`)
//! - `service.rs` - credential resolution, validation, owner override
//! - `repo.rs` - repository contract; every call takes an `OwnerScope`
//!
//! ### Infrastructure Layer (`clients::infra`)
//! - `storage/` - `SeaORM` entity for `clients_by_owner`, migrations, and the
//!   owner-scoped secure query wrapper
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use clients_sdk::{Client, ClientMeta, ClientsClientV1, ClientsError, NewClient};

pub mod config;
pub mod module;
pub use config::ClientsConfig;
pub use module::ClientsModule;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
