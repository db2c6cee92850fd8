#![doc = include_str!("../README.md")]

pub mod bots;
pub mod channels;
pub mod models;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
