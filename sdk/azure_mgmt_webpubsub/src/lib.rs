#![doc = include_str!("../README.md")]

pub mod hubs;
pub mod models;
pub mod webpubsub;

pub use models::{API_VERSION, PROVIDER_NAMESPACE};
