use crate::config::VertexConfig;

/// API version segment of the Vertex AI REST surface.
const API_VERSION: &str = "v1";

/// Publisher hosting the Gemini models.
const PUBLISHER: &str = "google";

/// Method name for the array-of-chunks generation endpoint.
const GENERATE_METHOD: &str = "streamGenerateContent";

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Constructs the `streamGenerateContent` URL for a configuration.
///
/// Uses `base_url` when set, `https://{api_endpoint}` otherwise. The result is
/// not validated here; the transport rejects malformed URLs.
#[must_use]
pub fn construct_generate_url(config: &VertexConfig) -> String {
    let base = match config.base_url.as_deref() {
        Some(base_url) => base_url.trim_end_matches('/').to_string(),
        None => format!("https://{}", config.api_endpoint),
    };

    format!(
        "{base}/{API_VERSION}/projects/{project}/locations/{location}/publishers/{PUBLISHER}/models/{model}:{GENERATE_METHOD}",
        project = config.project_id,
        location = config.location_id,
        model = config.model_id,
    )
}
