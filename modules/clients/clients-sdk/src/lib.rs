//! Clients SDK
//!
//! Public contract of the clients module:
//!
//! - [`ClientsClientV1`] - register, log in, and manage owner-scoped clients
//! - [`Client`], [`NewClient`], [`ClientMeta`] - data model
//! - [`ClientsError`] - the closed set of error kinds callers can observe
//!
//! ## Usage
//!
//! ```ignore
//! use clients_sdk::{ClientsClientV1, NewClient};
//!
//! clients.register("alice", "secret1").await?;
//! let token = clients.login("alice", "secret1").await?;
//! let id = clients.add_client(&token, NewClient::new("sensor", "temp1")).await?;
//! let client = clients.view_client(&token, id).await?;
//! ```

pub mod api;
pub mod errors;
pub mod models;

pub use api::ClientsClientV1;
pub use errors::ClientsError;
pub use models::{Client, ClientMeta, NewClient};
