#![doc = include_str!("../README.md")]

pub mod deployment_operations;
pub mod deployments;
pub mod models;
pub mod resource_groups;
pub mod resources;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
