//! Decoding and flattening of `streamGenerateContent` responses.
//!
//! The endpoint answers with a JSON array; each element is one streamed chunk
//! ([`ResponseEntry`]) carrying candidates whose parts hold text fragments.

use crate::errors::GenaiError;
use crate::http::error_helpers::deserialize_with_context;
use serde::Deserialize;

/// One element of the response array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl ResponseEntry {
    /// Concatenates every part's text across all candidates, in order.
    #[must_use]
    pub fn concatenate_parts(&self) -> String {
        let mut text = String::new();
        for candidate in &self.candidates {
            for part in &candidate.content.parts {
                if let Some(fragment) = &part.text {
                    text.push_str(fragment);
                }
            }
        }
        text
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part. Non-text parts decode with `text: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Citations for retrieval-grounded answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    #[serde(default)]
    pub retrieved_context: Option<RetrievedContext>,
}

/// A document retrieved from a datastore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RetrievedContext {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Decodes a raw response body into its entries.
///
/// # Errors
///
/// Returns [`GenaiError::Deserialization`] unless the body is a JSON array of
/// entries. The error carries the full body.
pub fn parse_response_body(body: &[u8]) -> Result<Vec<ResponseEntry>, GenaiError> {
    deserialize_with_context(body, "response entries")
}

/// Concatenates the text of all entries, in array order, with no separator.
#[must_use]
pub fn concatenate_entries(entries: &[ResponseEntry]) -> String {
    entries.iter().map(ResponseEntry::concatenate_parts).collect()
}

/// A decoded response with helpers for the fields beyond text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub entries: Vec<ResponseEntry>,
}

impl GenerateResponse {
    /// Parses a raw body. See [`parse_response_body`].
    ///
    /// # Errors
    ///
    /// Returns [`GenaiError::Deserialization`] on malformed bodies.
    pub fn from_body(body: &[u8]) -> Result<Self, GenaiError> {
        Ok(Self {
            entries: parse_response_body(body)?,
        })
    }

    /// The flattened text of every entry.
    #[must_use]
    pub fn text(&self) -> String {
        concatenate_entries(&self.entries)
    }

    /// Finish reasons reported by any candidate, in response order.
    #[must_use]
    pub fn finish_reasons(&self) -> Vec<&str> {
        self.candidates()
            .filter_map(|candidate| candidate.finish_reason.as_deref())
            .collect()
    }

    /// Retrieved contexts cited by any candidate, in response order.
    #[must_use]
    pub fn grounding_chunks(&self) -> Vec<&RetrievedContext> {
        self.candidates()
            .filter_map(|candidate| candidate.grounding_metadata.as_ref())
            .flat_map(|metadata| &metadata.grounding_chunks)
            .filter_map(|chunk| chunk.retrieved_context.as_ref())
            .collect()
    }

    /// The model version of the first entry that reports one.
    #[must_use]
    pub fn model_version(&self) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|entry| entry.model_version.as_deref())
    }

    fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter().flat_map(|entry| &entry.candidates)
    }
}
