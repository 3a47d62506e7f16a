//! Domain models for the merchant auth gateway.

pub mod session;
pub mod user;

pub use session::{Session, SessionId};
pub use user::{MerchantCredentials, MerchantLogin, Permission, Profile};
