#![doc = include_str!("../README.md")]

pub mod cache_nodes;
pub mod enterprise_mcc_customers;
pub mod models;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
