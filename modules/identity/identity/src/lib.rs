//! Identity Module
//!
//! Owns user accounts and the credentials issued to them. Other modules only
//! see it through [`identity_sdk::IdentityClient`]:
//!
//! - `create` registers an account (secret stored as an Argon2id hash)
//! - `authenticate` checks a username/secret pair and issues a signed credential
//! - `resolve` turns a presented credential back into a `SecurityContext`
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use identity_sdk::{IdentityClient, IdentityError};

pub mod config;
pub mod module;
pub use config::IdentityConfig;
pub use module::IdentityModule;

#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
