#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod store;
pub mod web_utils;
