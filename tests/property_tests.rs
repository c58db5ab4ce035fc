//! Property-based tests for smexperiments
//!
//! - Casing invariants over generated attribute names
//! - Projection never sends absent attributes
//! - Encoding and projection agree on remote field names
//! - Decoding keeps declared values and skips ignored fields
//! - Run with ProptestConfig::with_cases(100)

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Value};
use smexperiments::casing::CaseConverter;
use smexperiments::client::Fields;
use smexperiments::experiment::{
    TrialComponent, TrialComponentArtifact, TrialComponentParameterValue, TrialComponentStatus,
    TrialComponentSummary,
};
use smexperiments::record::{
    decode, encode_attributes, project, AttributeValue, Attributes, Record, ValueObject,
    BASE_IGNORED_FIELDS,
};

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate one snake case word: two leading letters, then letters or digits.
/// Acronym words are excluded; they are covered by unit tests.
fn arb_word() -> impl Strategy<Value = String> {
    "[a-z][a-z][a-z0-9]{0,6}".prop_filter("acronym word", |w| w != "http" && w != "https")
}

/// Generate a snake case attribute name of 1..=4 words.
fn arb_attribute_name() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_word(), 1..=4).prop_map(|words| words.join("_"))
}

/// Generate optional printable text.
fn arb_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ -~]{0,24}")
}

/// Generate an artifact with an optional media type.
fn arb_artifact() -> impl Strategy<Value = TrialComponentArtifact> {
    ("s3://[a-z]{1,8}/[a-z0-9/]{0,16}", proptest::option::of("[a-z]{1,6}/[a-z]{1,6}")).prop_map(
        |(value, media_type)| match media_type {
            Some(media_type) => TrialComponentArtifact::new(value).with_media_type(media_type),
            None => TrialComponentArtifact::new(value),
        },
    )
}

/// Generate named artifacts.
fn arb_artifacts() -> impl Strategy<Value = BTreeMap<String, TrialComponentArtifact>> {
    proptest::collection::btree_map("[a-z][a-z_]{0,10}", arb_artifact(), 0..3)
}

/// Generate a parameter bag with numeric or string values.
fn arb_parameters() -> impl Strategy<Value = BTreeMap<String, TrialComponentParameterValue>> {
    let value = prop_oneof![
        (-1.0e6..1.0e6f64).prop_map(TrialComponentParameterValue::number),
        "[a-z]{0,8}".prop_map(TrialComponentParameterValue::string),
    ];
    proptest::collection::btree_map("[a-z][a-z_]{0,10}", value, 0..5)
}

/// Generate trial component attributes with each attribute independently
/// present or absent.
fn arb_trial_component() -> impl Strategy<Value = Attributes> {
    (
        arb_text(),
        arb_text(),
        arb_text(),
        proptest::option::of(0i64..2_000_000_000),
        proptest::option::of(arb_artifacts()),
        proptest::option::of(arb_parameters()),
    )
        .prop_map(|(name, display_name, message, start, artifacts, parameters)| {
            let mut attributes = Attributes::new()
                .with_opt("trial_component_name", name)
                .with_opt("display_name", display_name)
                .with_opt(
                    "start_time",
                    start.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
                )
                .with_opt("input_artifacts", artifacts.as_ref().map(AttributeValue::map))
                .with_opt("parameters", parameters.as_ref().map(AttributeValue::map));
            if let Some(message) = message {
                let status = TrialComponentStatus::default().with_message(message);
                attributes.insert("status", status.to_attributes());
            }
            attributes
        })
}

fn all_shape_names() -> Vec<&'static str> {
    [
        &TrialComponent::SHAPE,
        &TrialComponentSummary::SHAPE,
        &TrialComponentStatus::SHAPE,
        &TrialComponentArtifact::SHAPE,
    ]
    .iter()
    .flat_map(|shape| shape.names())
    .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: local -> remote -> local is the identity
    #[test]
    fn prop_casing_round_trip(name in arb_attribute_name()) {
        let casing = CaseConverter::default();
        let remote = casing.to_remote(&name);
        prop_assert_eq!(casing.to_local(&remote), name);
    }

    /// Property: remote names never contain separators
    #[test]
    fn prop_remote_names_have_no_underscore(name in arb_attribute_name()) {
        let remote = CaseConverter::default().to_remote(&name);
        prop_assert!(!remote.contains('_'));
        prop_assert!(remote.chars().next().is_some_and(char::is_uppercase));
    }

    /// Property: a registered acronym survives the round trip anywhere in a name
    #[test]
    fn prop_acronym_round_trip(
        prefix in arb_word(),
        suffix in arb_word(),
    ) {
        let casing = CaseConverter::default().with_acronym("ARN");
        let name = format!("{prefix}_arn_{suffix}");
        let remote = casing.to_remote(&name);
        prop_assert!(remote.contains("ARN"));
        prop_assert_eq!(casing.to_local(&remote), name);
    }

    /// Property: projection sends exactly the present update members
    #[test]
    fn prop_projection_omits_absent(attributes in arb_trial_component()) {
        let casing = CaseConverter::default();
        let tc = TrialComponent::from_attributes(attributes.clone());
        let request = project(
            &TrialComponent::SHAPE,
            &tc.to_attributes(),
            TrialComponent::UPDATE_MEMBERS,
            &casing,
        ).unwrap();

        for member in TrialComponent::UPDATE_MEMBERS {
            let remote = casing.to_remote(member);
            prop_assert_eq!(request.contains_key(&remote), attributes.contains(member));
            if let Some(value) = request.get(&remote) {
                prop_assert!(!value.is_null());
            }
        }
        prop_assert!(request.len() <= TrialComponent::UPDATE_MEMBERS.len());
    }

    /// Property: create-style encoding and update projection send the same
    /// remote fields for the same attributes
    #[test]
    fn prop_encode_agrees_with_projection(attributes in arb_trial_component()) {
        let casing = CaseConverter::default();
        let encoded = encode_attributes(&TrialComponent::SHAPE, &attributes, &casing).unwrap();
        let projected = project(
            &TrialComponent::SHAPE,
            &attributes,
            TrialComponent::UPDATE_MEMBERS,
            &casing,
        ).unwrap();
        prop_assert_eq!(encoded, projected);
    }

    /// Property: decoding an encoded record gives the same attributes back
    #[test]
    fn prop_decode_keeps_declared_values(attributes in arb_trial_component()) {
        let casing = CaseConverter::default();
        let fields = encode_attributes(&TrialComponent::SHAPE, &attributes, &casing).unwrap();
        let decoded = decode(&TrialComponent::SHAPE, &fields, BASE_IGNORED_FIELDS, &casing);
        prop_assert_eq!(decoded, attributes);
    }

    /// Property: ignored and undeclared fields never reach the attributes
    #[test]
    fn prop_ignored_fields_skipped(
        extra in arb_attribute_name(),
        payload in "[a-z]{1,8}",
    ) {
        let casing = CaseConverter::default();
        let extra_remote = casing.to_remote(&extra);
        let mut fields = Fields::new();
        fields.insert("TrialComponentName".to_string(), json!("tc"));
        fields.insert("CreatedBy".to_string(), json!({"UserProfileName": payload.clone()}));
        fields.insert("ResponseMetadata".to_string(), json!({"RequestId": payload.clone()}));
        fields.insert(extra_remote, Value::String(payload));

        let ignored: Vec<&str> = BASE_IGNORED_FIELDS
            .iter()
            .chain(TrialComponent::IGNORED_FIELDS)
            .copied()
            .collect();
        let decoded = decode(&TrialComponent::SHAPE, &fields, &ignored, &casing);

        prop_assert!(!decoded.contains("created_by"));
        prop_assert!(!decoded.contains("response_metadata"));
        for (name, _) in decoded.iter() {
            prop_assert!(TrialComponent::SHAPE.contains(name));
        }
    }
}

#[test]
fn test_every_declared_name_round_trips() {
    let casing = CaseConverter::default();
    for name in all_shape_names() {
        assert_eq!(casing.to_local(&casing.to_remote(name)), name);
    }
}
