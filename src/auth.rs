//! Credential material and bearer-token acquisition.
//!
//! Service-account keys are handed to `gcp_auth`, which signs the JWT grant,
//! caches the resulting access token and refreshes it before expiry. The
//! client only asks for a token per request.

use crate::errors::GenaiError;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// OAuth scope required by Vertex AI.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Credential material supplied at construction.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// Contents of a service-account key file (JSON).
    ServiceAccountJson(String),
    /// A pre-minted OAuth access token, sent as-is on every request.
    ///
    /// The token is never refreshed; callers own its lifetime.
    AccessToken(String),
}

impl Credentials {
    /// Returns `true` when no credential material was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ServiceAccountJson(material) | Self::AccessToken(material) => {
                material.trim().is_empty()
            }
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::ServiceAccountJson(String::new())
    }
}

// Never print secrets.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::ServiceAccountJson(_) => "ServiceAccountJson",
            Self::AccessToken(_) => "AccessToken",
        };
        let state = if self.is_empty() { "<empty>" } else { "<redacted>" };
        write!(f, "{kind}({state})")
    }
}

/// Source of bearer tokens shared by every call of a client.
#[derive(Clone)]
pub(crate) enum TokenSource {
    ServiceAccount(Arc<CustomServiceAccount>),
    Static(String),
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAccount(_) => f.write_str("TokenSource::ServiceAccount"),
            Self::Static(_) => f.write_str("TokenSource::Static"),
        }
    }
}

impl TokenSource {
    /// Parses the credential material. No network I/O happens here.
    pub(crate) fn from_credentials(credentials: &Credentials) -> Result<Self, GenaiError> {
        match credentials {
            Credentials::ServiceAccountJson(json) => {
                let account = CustomServiceAccount::from_json(json).map_err(|e| {
                    error!(error = %e, "Failed to load service account credentials");
                    GenaiError::Credential(format!(
                        "failed to load service account credentials: {e}"
                    ))
                })?;
                Ok(Self::ServiceAccount(Arc::new(account)))
            }
            Credentials::AccessToken(token) => Ok(Self::Static(token.trim().to_string())),
        }
    }

    /// Returns a token valid for [`CLOUD_PLATFORM_SCOPE`].
    pub(crate) async fn bearer_token(&self) -> Result<String, GenaiError> {
        match self {
            Self::ServiceAccount(account) => {
                let token = account.token(&[CLOUD_PLATFORM_SCOPE]).await.map_err(|e| {
                    error!(error = %e, "Failed to get GCP access token");
                    GenaiError::Auth(e.to_string())
                })?;
                debug!("Obtained service account access token");
                Ok(token.as_str().to_string())
            }
            Self::Static(token) => Ok(token.clone()),
        }
    }
}
