//! # Gateway Types
//!
//! Domain types and port traits for the merchant auth gateway.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Session, Profile, MerchantCredentials)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Token, upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    MerchantCredentials, MerchantLogin, Permission, Profile, Session, SessionId,
};
pub use dto::*;
pub use error::{AppError, TokenError, UpstreamError};
pub use ports::MerchantPlatform;
