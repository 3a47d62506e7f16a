//! Merchant user domain models.

use serde::{Deserialize, Serialize};

/// Credentials for the merchant platform login call.
///
/// Transient - used for a single login request and never stored.
#[derive(Clone, Serialize, Deserialize)]
pub struct MerchantCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A successful login against the merchant platform.
#[derive(Debug, Clone)]
pub struct MerchantLogin {
    /// Opaque merchant token to replay authenticated calls with.
    pub token: String,
    /// Perimeter id carried alongside the token.
    pub perimetre: String,
    /// The full user document as returned by the platform.
    pub user: serde_json::Value,
}

/// A single permission entry in the merchant user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub grade: i64,
}

/// The authenticated user's profile as served by the merchant platform.
///
/// Only the fields the gateway knows about are typed; everything else is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perimetre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_postal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indispo: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
