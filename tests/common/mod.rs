//! Common test utilities shared across integration test files.
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use std::sync::{Arc, Mutex};
use vertex_genai::{Client, ClientBuilder, Logger};
use wiremock::MockServer;

pub const PROJECT_ID: &str = "test-project";
pub const LOCATION_ID: &str = "us-central1";
pub const MODEL_ID: &str = "gemini-test";
pub const ACCESS_TOKEN: &str = "test-access-token";

/// Path the client posts to for the constants above.
pub const GENERATE_PATH: &str = "/v1/projects/test-project/locations/us-central1/publishers/google/models/gemini-test:streamGenerateContent";

/// A builder pointed at `server` with a static access token.
pub fn client_builder(server: &MockServer) -> ClientBuilder {
    Client::builder()
        .project_id(PROJECT_ID)
        .location_id(LOCATION_ID)
        .api_endpoint("unused.example.com")
        .model_id(MODEL_ID)
        .access_token(ACCESS_TOKEN)
        .base_url(server.uri())
}

pub fn mock_client(server: &MockServer) -> Client {
    client_builder(server).build().expect("client should build")
}

/// Builds a `streamGenerateContent` body with one candidate per entry.
pub fn stream_body(entries: &[&[&str]]) -> serde_json::Value {
    serde_json::Value::Array(
        entries
            .iter()
            .map(|parts| {
                let parts: Vec<_> = parts
                    .iter()
                    .map(|text| serde_json::json!({ "text": text }))
                    .collect();
                serde_json::json!({
                    "candidates": [{ "content": { "role": "model", "parts": parts } }]
                })
            })
            .collect(),
    )
}

/// Logger that records every message with its level.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, String)>>,
}

#[allow(dead_code)]
impl RecordingLogger {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn levels(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(l, _)| *l).collect()
    }

    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.events.lock().unwrap().push(("debug", message.to_string()));
    }

    fn info(&self, message: &str) {
        self.events.lock().unwrap().push(("info", message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(("error", message.to_string()));
    }
}
