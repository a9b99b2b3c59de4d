//! Property-based tests for payload assembly and response flattening.

use proptest::prelude::*;
use serde_json::json;

use super::config::VertexConfig;
use super::payload::build_payload;
use super::prompt::{Prompt, Turn};
use super::request::Tool;
use super::response::{GenerateResponse, parse_response_body};

// =============================================================================
// Strategies
// =============================================================================

fn arb_datastore() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}".prop_map(|id| {
        format!("projects/p/locations/global/collections/default_collection/dataStores/{id}")
    })
}

fn arb_datastores() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_datastore(), 0..5)
}

fn arb_instructions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(".{1,40}", 0..4)
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    (prop_oneof![Just("user"), Just("model")], ".{0,40}").prop_map(|(role, text)| Turn::new(role, text))
}

/// Response entries as nested text fragments: entries > candidates > parts.
fn arb_fragments() -> impl Strategy<Value = Vec<Vec<Vec<String>>>> {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec(".{0,12}", 0..4), 0..3),
        0..4,
    )
}

fn body_from_fragments(fragments: &[Vec<Vec<String>>]) -> Vec<u8> {
    let entries: Vec<serde_json::Value> = fragments
        .iter()
        .map(|candidates| {
            let candidates: Vec<serde_json::Value> = candidates
                .iter()
                .map(|parts| {
                    let parts: Vec<serde_json::Value> =
                        parts.iter().map(|text| json!({ "text": text })).collect();
                    json!({ "content": { "role": "model", "parts": parts } })
                })
                .collect();
            json!({ "candidates": candidates })
        })
        .collect();
    serde_json::to_vec(&entries).unwrap()
}

// =============================================================================
// Payload assembly
// =============================================================================

proptest! {
    #[test]
    fn per_call_datastores_become_tools_exactly(
        defaults in arb_datastores(),
        overrides in arb_datastores(),
    ) {
        let config = VertexConfig { datastores: defaults, ..Default::default() };
        let payload = build_payload(&"q".into(), &config, Some(overrides.as_slice()), None);

        let names: Vec<&str> = payload.tools.iter().map(Tool::datastore_name).collect();
        prop_assert_eq!(names, overrides.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn default_datastores_become_tools_without_override(defaults in arb_datastores()) {
        let config = VertexConfig { datastores: defaults.clone(), ..Default::default() };
        let payload = build_payload(&"q".into(), &config, None, None);

        let names: Vec<&str> = payload.tools.iter().map(Tool::datastore_name).collect();
        prop_assert_eq!(names, defaults.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn system_instruction_is_default_then_overrides(
        default in proptest::option::of(".{1,40}"),
        overrides in arb_instructions(),
    ) {
        let config = VertexConfig { system_instruction: default.clone(), ..Default::default() };
        let payload = build_payload(&"q".into(), &config, None, Some(overrides.as_slice()));

        let expected: Vec<String> = default.into_iter().chain(overrides).collect();
        let actual: Vec<String> = payload
            .system_instruction
            .map(|si| si.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn turns_map_one_to_one_onto_contents(turns in prop::collection::vec(arb_turn(), 0..6)) {
        let payload = build_payload(&Prompt::from(turns.clone()), &VertexConfig::default(), None, None);

        prop_assert_eq!(payload.contents.len(), turns.len());
        for (message, turn) in payload.contents.iter().zip(&turns) {
            prop_assert_eq!(&message.role, &turn.role);
            prop_assert_eq!(message.parts.len(), 1);
            prop_assert_eq!(&message.parts[0].text, &turn.text);
        }
    }
}

// =============================================================================
// Response flattening
// =============================================================================

proptest! {
    #[test]
    fn flattened_text_is_concatenation_of_fragments(fragments in arb_fragments()) {
        let body = body_from_fragments(&fragments);
        let response = GenerateResponse::from_body(&body).unwrap();

        let expected: String = fragments.iter().flatten().flatten().map(String::as_str).collect();
        prop_assert_eq!(response.text(), expected);
    }

    #[test]
    fn parsing_is_deterministic(fragments in arb_fragments()) {
        let body = body_from_fragments(&fragments);
        let first = parse_response_body(&body).unwrap();
        let second = parse_response_body(&body).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn non_array_bodies_are_rejected(text in "[a-zA-Z ]{0,30}") {
        let body = serde_json::to_vec(&json!({ "text": text })).unwrap();
        prop_assert!(parse_response_body(&body).is_err());
    }
}
