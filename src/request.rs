//! Wire types for the `streamGenerateContent` request body.

use serde::Serialize;

/// The JSON document POSTed to Vertex AI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub contents: Vec<Message>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

/// One conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

/// Sampling parameters. Always [`GenerationConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_output_tokens: 8192,
            top_p: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHateSpeech,
    HarmCategoryDangerousContent,
    HarmCategorySexuallyExplicit,
    HarmCategoryHarassment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Safety filters sent with every request: all four categories disabled.
#[must_use]
pub fn default_safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategoryDangerousContent,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryHarassment,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::Off,
    })
    .collect()
}

/// A retrieval tool grounding answers in one Vertex AI Search datastore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub retrieval: Retrieval,
}

impl Tool {
    pub fn datastore(datastore: impl Into<String>) -> Self {
        Self {
            retrieval: Retrieval {
                vertex_ai_search: VertexAiSearch {
                    datastore: datastore.into(),
                },
            },
        }
    }

    /// The datastore resource name this tool points at.
    #[must_use]
    pub fn datastore_name(&self) -> &str {
        &self.retrieval.vertex_ai_search.datastore
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Retrieval {
    pub vertex_ai_search: VertexAiSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexAiSearch {
    pub datastore: String,
}
