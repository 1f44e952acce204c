//! Microsoft Graph access for entitlement management.
//!
//! This module provides:
//! - Paginated GET with explicit per-page outcomes
//! - Access package, assignment policy and assignment listing
//! - Directory object display-name lookup

pub mod client;
pub mod models;

pub use client::GraphClient;
