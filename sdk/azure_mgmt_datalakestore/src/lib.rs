#![doc = include_str!("../README.md")]

pub mod accounts;
pub mod firewall_rules;
pub mod models;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
