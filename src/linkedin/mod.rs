// src/linkedin/mod.rs
pub mod client;
pub mod models;

#[allow(unused_imports)]
pub use client::ProfileClient;
#[allow(unused_imports)]
pub use models::{FetchConfig, ProfileRecord};
