#![doc = include_str!("../README.md")]

pub mod models;
pub mod operations;
pub mod terraform;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
