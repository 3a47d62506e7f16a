//! Merchant platform port trait.
//!
//! This is the outbound port of the gateway: the contract the upstream
//! HTTP adapter (and test stubs) must implement.

use crate::domain::{MerchantCredentials, MerchantLogin, Profile, Session};
use crate::error::UpstreamError;

/// Operations against the external merchant platform.
///
/// All calls are single-shot and non-retrying; retry policy, if any,
/// belongs to the caller.
#[async_trait::async_trait]
pub trait MerchantPlatform: Send + Sync + 'static {
    /// Authenticates with the platform.
    ///
    /// Upstream rejections and transport failures both surface as
    /// `UpstreamError`; this method never panics past its boundary.
    async fn login(
        &self,
        credentials: MerchantCredentials,
    ) -> Result<MerchantLogin, UpstreamError>;

    /// Logs the session out of the platform.
    ///
    /// Returns whether upstream confirmed success. Transport failures are
    /// reported the same as upstream-reported failures (`false`); the
    /// distinction is logged, not surfaced.
    async fn logout(&self, session: &Session) -> bool;

    /// Fetches the authenticated user's profile.
    ///
    /// `None` on any failure, transport or upstream-reported.
    async fn fetch_profile(&self, session: &Session) -> Option<Profile>;
}
