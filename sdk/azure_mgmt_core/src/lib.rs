#![doc = include_str!("../README.md")]

pub mod auth;
pub mod client;
pub mod cloud;
pub mod error;
pub mod models;
pub mod operations;
pub mod pager;
pub mod path;
pub mod poller;
pub mod profile;
pub mod resource_id;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::ArmClient;
pub use error::{ArmError, ArmResult};
