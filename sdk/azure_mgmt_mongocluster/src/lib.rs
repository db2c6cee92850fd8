#![doc = include_str!("../README.md")]

pub mod firewall_rules;
pub mod models;
pub mod mongo_clusters;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
