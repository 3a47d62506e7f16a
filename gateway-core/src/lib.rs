//! # Gateway Core
//!
//! Application service layer and HTTP adapter for the merchant auth gateway.
//!
//! ## Architecture
//!
//! - `token` - bearer credential issuer (signed JWT wrapping the merchant token)
//! - `registry` - in-memory session table with injected clock and timeout
//! - `sweeper` - periodic background removal of expired sessions
//! - `service` - orchestration of login/logout/profile flows
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `M: MerchantPlatform`, allowing the real
//! upstream adapter or a test stub to be injected.

pub mod inbound;
pub mod registry;
pub mod service;
pub mod sweeper;
pub mod token;

mod openapi;

#[cfg(test)]
mod service_tests;

pub use registry::{Clock, SessionRegistry, SystemClock};
pub use service::AuthService;
pub use sweeper::Sweeper;
pub use token::{Claims, TokenIssuer};
