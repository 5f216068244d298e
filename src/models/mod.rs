//! Request and Response models for the HTTP API
//!
//! This module defines the DTOs used for serializing/deserializing
//! HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{parse_user_id, LoginRequest};
pub use responses::{
    ErrorResponse, HealthResponse, LoginResponse, StatsResponse, UserResponse, UsersResponse,
};
