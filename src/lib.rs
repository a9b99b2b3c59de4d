//! Client for Vertex AI generative models with retrieval grounding.
//!
//! A [`Client`] is built once from a [`VertexConfig`] and then used for any
//! number of generation calls. Each call turns a prompt (a single text or a
//! conversation of [`Turn`]s) into a `streamGenerateContent` request, attaches
//! the configured Vertex AI Search datastores and system instructions, and
//! flattens every text part of the response into one string.
//!
//! ```no_run
//! use vertex_genai::Client;
//!
//! # async fn example() -> Result<(), vertex_genai::GenaiError> {
//! let client = Client::builder()
//!     .project_id("my-project")
//!     .location_id("us-central1")
//!     .api_endpoint("us-central1-aiplatform.googleapis.com")
//!     .service_account_json(std::fs::read_to_string("key.json").unwrap_or_default())
//!     .datastore("projects/my-project/locations/global/collections/default_collection/dataStores/docs")
//!     .build()?;
//!
//! let answer = client.generate("How do I add a route?").send().await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
//!
//! Set `LOUD_WIRE=1` to print every request and response body to stderr.

mod auth;
mod client;
mod config;
mod errors;
pub(crate) mod http;
mod logging;
mod payload;
mod prompt;
mod request;
mod response;

#[cfg(test)]
mod proptest_tests;

pub use auth::{CLOUD_PLATFORM_SCOPE, Credentials};
pub use client::{Client, ClientBuilder, GenerateBuilder};
pub use config::{DEFAULT_MODEL_ID, MissingConfig, VertexConfig};
pub use errors::GenaiError;
pub use logging::{Logger, TracingLogger};
pub use payload::build_payload;
pub use prompt::{MODEL_ROLE, Prompt, Turn, USER_ROLE};
pub use request::{
    GenerationConfig, HarmBlockThreshold, HarmCategory, Message, Part, RequestPayload, Retrieval,
    SafetySetting, SystemInstruction, Tool, VertexAiSearch, default_safety_settings,
};
pub use response::{
    Candidate, Content, GenerateResponse, GroundingChunk, GroundingMetadata, ResponseEntry,
    ResponsePart, RetrievedContext, concatenate_entries, parse_response_body,
};

/// Builds the `streamGenerateContent` URL for a configuration.
#[must_use]
pub fn generate_url(config: &VertexConfig) -> String {
    http::common::construct_generate_url(config)
}
