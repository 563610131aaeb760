#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod owner_scope;

pub use context::{SecurityContext, SecurityContextBuilder};
pub use owner_scope::OwnerScope;
