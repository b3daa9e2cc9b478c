//! Server API

pub mod client;

pub use client::{fetch_teams, upload_receipt};
