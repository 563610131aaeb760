//! Identity SDK
//!
//! This crate provides the public contract of the identity module, the
//! collaborator that owns user accounts and credentials:
//!
//! - [`IdentityClient`] - resolve credentials, log in, register accounts
//! - [`IdentityError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use identity_sdk::IdentityClient;
//!
//! let user_id = identity.create("alice", "secret1").await?;
//! let token = identity.authenticate("alice", "secret1").await?;
//! let ctx = identity.resolve(&token).await?;
//! assert_eq!(ctx.subject_id(), user_id);
//! ```

pub mod api;
pub mod error;

pub use api::IdentityClient;
pub use error::IdentityError;
