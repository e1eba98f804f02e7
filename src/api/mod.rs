//! API client module for the surat management backend.
//!
//! Provides the HTTP client with token header injection, the letter
//! operations, the identity check, and request/response types matching the
//! backend's JSON contract.

pub mod client;
pub mod error;
pub mod surat;
pub mod types;
pub mod user;
