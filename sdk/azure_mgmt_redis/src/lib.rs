#![doc = include_str!("../README.md")]

pub mod firewall_rules;
pub mod models;
pub mod redis;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
