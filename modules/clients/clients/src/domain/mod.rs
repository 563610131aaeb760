pub mod error;
pub mod local_client;
pub mod model;
pub mod repo;
pub mod service;

#[cfg(test)]
mod service_test;
