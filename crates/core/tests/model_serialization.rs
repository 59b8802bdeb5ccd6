//! The serialized vocabulary is consumed by the save-dialog UI; these
//! shapes are part of the external contract.

use codedrop_core::classify::LanguageTag;
use codedrop_core::model::{CodeUnit, ConfidenceTier, DetectionResult, Destination, Provenance};

#[test]
fn detection_results_serialize_with_kebab_provenance() {
    let result = DetectionResult::new(
        "main.rs",
        Provenance::StructuralSignature,
        ConfidenceTier::High,
    );
    let value = serde_json::to_value(&result).expect("serialize");

    assert_eq!(
        value,
        serde_json::json!({
            "suggested_name": "main.rs",
            "provenance": "structural-signature",
            "confidence": "high",
        })
    );
}

#[test]
fn all_provenance_values_round_trip() {
    let variants = [
        (Provenance::ExplicitMarker, "explicit-marker"),
        (Provenance::ConversationalContext, "conversational-context"),
        (Provenance::LeadingComment, "leading-comment"),
        (Provenance::StructuralSignature, "structural-signature"),
        (Provenance::MarkdownHeading, "markdown-heading"),
        (Provenance::Generated, "generated"),
    ];
    for (variant, expected) in variants {
        let value = serde_json::to_value(variant).expect("serialize");
        assert_eq!(value, serde_json::json!(expected));
        let back: Provenance = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, variant);
    }
}

#[test]
fn language_tags_serialize_as_their_extension() {
    let unit = CodeUnit::new("print(1)", LanguageTag::Py);
    let value = serde_json::to_value(&unit).expect("serialize");
    assert_eq!(value["language"], "py");

    let dockerfile = serde_json::to_value(LanguageTag::Dockerfile).expect("serialize");
    assert_eq!(dockerfile, serde_json::json!("dockerfile"));
}

#[test]
fn destinations_round_trip() {
    let destination = Destination::new("proj1", "Project One", "/home/me/proj1");
    let json = serde_json::to_string(&destination).expect("serialize");
    let back: Destination = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, destination);
}
