//! Assembles a [`RequestPayload`] from a prompt, per-call overrides and the
//! client's configured defaults.

use crate::config::VertexConfig;
use crate::prompt::{Prompt, USER_ROLE};
use crate::request::{
    GenerationConfig, Message, Part, RequestPayload, SystemInstruction, Tool,
    default_safety_settings,
};

/// Builds the request document for one call.
///
/// * `datastores`: when `Some`, replaces the configured datastores entirely,
///   even if the list is empty.
/// * `system_instructions`: appended after the configured system instruction.
///
/// Performs no validation; an empty prompt yields degenerate contents.
#[must_use]
pub fn build_payload(
    prompt: &Prompt,
    defaults: &VertexConfig,
    datastores: Option<&[String]>,
    system_instructions: Option<&[String]>,
) -> RequestPayload {
    RequestPayload {
        contents: messages_from_prompt(prompt),
        generation_config: GenerationConfig::default(),
        safety_settings: default_safety_settings(),
        system_instruction: merge_system_instructions(
            defaults.system_instruction.as_deref(),
            system_instructions.unwrap_or_default(),
        ),
        tools: datastore_tools(datastores.unwrap_or(defaults.datastores.as_slice())),
    }
}

fn messages_from_prompt(prompt: &Prompt) -> Vec<Message> {
    match prompt {
        Prompt::Text(text) => vec![Message {
            role: USER_ROLE.to_string(),
            parts: vec![Part::text(text.as_str())],
        }],
        Prompt::Turns(turns) => turns
            .iter()
            .map(|turn| Message {
                role: turn.role.clone(),
                parts: vec![Part::text(turn.text.as_str())],
            })
            .collect(),
    }
}

fn datastore_tools(datastores: &[String]) -> Vec<Tool> {
    datastores
        .iter()
        .map(|datastore| Tool::datastore(datastore.as_str()))
        .collect()
}

fn merge_system_instructions(
    default: Option<&str>,
    overrides: &[String],
) -> Option<SystemInstruction> {
    let parts: Vec<Part> = default
        .filter(|text| !text.is_empty())
        .into_iter()
        .chain(overrides.iter().map(String::as_str))
        .map(Part::text)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(SystemInstruction { parts })
    }
}
