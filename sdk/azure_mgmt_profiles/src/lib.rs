#![doc = include_str!("../README.md")]

pub mod hybrid_2020_09_01;
pub mod latest;
