//! Endpoint and identity configuration for a [`Client`](crate::Client).

use crate::auth::Credentials;
use serde::Deserialize;
use thiserror::Error;

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL_ID: &str = "gemini-1.5-pro-002";

/// Required configuration fields that were left empty.
///
/// All missing fields are reported together, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing {}: {}", noun(.fields), .fields.join(", "))]
pub struct MissingConfig {
    fields: Vec<&'static str>,
}

fn noun(fields: &[&str]) -> &'static str {
    if fields.len() == 1 { "config" } else { "configs" }
}

impl MissingConfig {
    pub(crate) fn new(fields: Vec<&'static str>) -> Self {
        Self { fields }
    }

    /// Names of the missing fields.
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }
}

/// Configuration for the Vertex AI endpoint.
///
/// Usually assembled through [`ClientBuilder`](crate::ClientBuilder), but it
/// also deserializes from any serde format:
///
/// ```
/// use vertex_genai::VertexConfig;
///
/// let config: VertexConfig = serde_json::from_str(r#"{
///     "project_id": "my-project",
///     "location_id": "us-central1",
///     "api_endpoint": "us-central1-aiplatform.googleapis.com",
///     "credentials": { "access_token": "ya29.token" },
///     "datastores": ["projects/my-project/locations/global/collections/default_collection/dataStores/docs"]
/// }"#).unwrap();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VertexConfig {
    pub project_id: String,
    pub location_id: String,
    /// Host serving the API, e.g. `us-central1-aiplatform.googleapis.com`.
    pub api_endpoint: String,
    pub model_id: String,
    pub credentials: Credentials,
    /// Datastores used for retrieval when a call does not supply its own.
    pub datastores: Vec<String>,
    /// Instruction placed ahead of any per-call system instructions.
    pub system_instruction: Option<String>,
    /// Replaces `https://{api_endpoint}` as the URL prefix.
    pub base_url: Option<String>,
}

impl VertexConfig {
    /// Fills in the model ID when unset. Touches nothing else.
    pub fn set_defaults(&mut self) {
        if self.model_id.is_empty() {
            self.model_id = DEFAULT_MODEL_ID.to_string();
        }
    }

    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns a [`MissingConfig`] naming all empty required fields.
    pub fn validate(&self) -> Result<(), MissingConfig> {
        let mut missing = Vec::new();

        if self.project_id.is_empty() {
            missing.push("project_id");
        }
        if self.location_id.is_empty() {
            missing.push("location_id");
        }
        if self.api_endpoint.is_empty() {
            missing.push("api_endpoint");
        }
        if self.credentials.is_empty() {
            missing.push("credentials");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingConfig::new(missing))
        }
    }
}
