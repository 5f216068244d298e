//! Upstream Module
//!
//! Access to the external user-listing service.

mod client;
mod error;

pub use client::{UpstreamClient, User, UserSource};
pub use error::UpstreamError;
