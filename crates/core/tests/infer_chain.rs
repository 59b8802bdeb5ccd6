use codedrop_core::classify::LanguageTag;
use codedrop_core::infer::{infer_at, infer_from_text};
use codedrop_core::model::{CodeUnit, ConfidenceTier, Provenance, Surroundings};
use regex::Regex;

/// Fixed timestamp for the generated fallback so results are reproducible.
const NOW: i64 = 1_700_000_000_000;

fn unit(content: &str, language: LanguageTag) -> CodeUnit {
    CodeUnit::new(content, language)
}

/// Any input, even empty, yields a non-empty name carrying an extension.
#[test]
fn infer_is_total_for_empty_input() {
    let result = infer_at(&unit("", LanguageTag::Txt), &Surroundings::default(), NOW);

    assert!(!result.suggested_name.is_empty());
    assert!(result.suggested_name.ends_with(".txt"));
    assert_eq!(result.provenance, Provenance::Generated);
    assert_eq!(result.confidence, ConfidenceTier::None);
}

/// Identical inputs (including the timestamp) yield identical results.
#[test]
fn infer_is_deterministic() {
    let code = unit("something unrecognizable", LanguageTag::Txt);
    let surroundings = Surroundings::from_context_text("no cues here");

    let first = infer_at(&code, &surroundings, NOW);
    let second = infer_at(&code, &surroundings, NOW);
    assert_eq!(first, second);
}

/// An explicit marker outranks a conversational-context match.
#[test]
fn explicit_marker_wins_over_context() {
    let surroundings = Surroundings {
        label: Some("config.rs".to_string()),
        context_text: "save it to other.rs".to_string(),
        ..Surroundings::default()
    };
    let result = infer_at(&unit("let x = 1;", LanguageTag::Rs), &surroundings, NOW);

    assert_eq!(result.suggested_name, "config.rs");
    assert_eq!(result.provenance, Provenance::ExplicitMarker);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

/// A file-identifying attribute is an explicit marker too, and may carry a
/// relative path.
#[test]
fn file_attribute_is_an_explicit_marker() {
    let surroundings = Surroundings {
        file_attribute: Some("src/handlers.py".to_string()),
        ..Surroundings::default()
    };
    let result = infer_at(&unit("def handle(): pass", LanguageTag::Py), &surroundings, NOW);

    assert_eq!(result.suggested_name, "src/handlers.py");
    assert_eq!(result.provenance, Provenance::ExplicitMarker);
}

/// A label that is prose rather than a bare filename is ignored.
#[test]
fn non_filename_label_falls_through() {
    let surroundings = Surroundings {
        label: Some("Here is the code you asked for".to_string()),
        ..Surroundings::default()
    };
    let result = infer_at(&unit("plain text", LanguageTag::Txt), &surroundings, NOW);
    assert_eq!(result.provenance, Provenance::Generated);
}

#[test]
fn save_phrasing_captures_a_path() {
    let result = infer_from_text(
        &unit("x = 1", LanguageTag::Txt),
        "you should save this as src/parser.rs please",
    );

    assert_eq!(result.suggested_name, "src/parser.rs");
    assert_eq!(result.provenance, Provenance::ConversationalContext);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

#[test]
fn filename_label_phrasing_is_high_confidence() {
    let result =
        infer_from_text(&unit("x = 1", LanguageTag::Txt), "filename: app_settings.toml");

    assert_eq!(result.suggested_name, "app_settings.toml");
    assert_eq!(result.confidence, ConfidenceTier::High);
}

#[test]
fn heres_the_phrasing_is_medium_confidence() {
    let result = infer_from_text(
        &unit("x = 1", LanguageTag::Txt),
        "here's the updated config.yaml for your deployment",
    );

    assert_eq!(result.suggested_name, "config.yaml");
    assert_eq!(result.provenance, Provenance::ConversationalContext);
    assert_eq!(result.confidence, ConfidenceTier::Medium);
}

#[test]
fn quoted_bare_filename_is_low_confidence() {
    let result =
        infer_from_text(&unit("x = 1", LanguageTag::Txt), "the file \"notes.md\" covers it");

    assert_eq!(result.suggested_name, "notes.md");
    assert_eq!(result.confidence, ConfidenceTier::Low);
}

#[test]
fn in_path_phrasing_is_medium_confidence() {
    let result =
        infer_from_text(&unit("x = 1", LanguageTag::Txt), "put it in src/app.ts and rebuild");

    assert_eq!(result.suggested_name, "src/app.ts");
    assert_eq!(result.confidence, ConfidenceTier::Medium);
}

/// A heading that is itself a filename counts as conversational context
/// when it arrives inside the flattened text.
#[test]
fn heading_filename_in_context_text() {
    let result = infer_from_text(&unit("print('hi')", LanguageTag::Py), "## setup.py\nrun this");

    assert_eq!(result.suggested_name, "setup.py");
    assert_eq!(result.provenance, Provenance::ConversationalContext);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

/// A captured token with a leading digit fails validation and the chain
/// falls through past the conversational strategy.
#[test]
fn leading_digit_capture_is_rejected() {
    let result = infer_from_text(&unit("x = 1", LanguageTag::Txt), "save it to 42name.txt");

    assert_ne!(result.provenance, Provenance::ConversationalContext);
    assert_eq!(result.provenance, Provenance::Generated);
}

#[test]
fn leading_comment_names_the_file() {
    let result = infer_from_text(&unit("// src/lib.rs\npub fn f() {}", LanguageTag::Rs), "");

    assert_eq!(result.suggested_name, "src/lib.rs");
    assert_eq!(result.provenance, Provenance::LeadingComment);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

#[test]
fn leading_comment_supports_file_label_and_hash_prefix() {
    let result = infer_from_text(&unit("# file: app.py\nimport os", LanguageTag::Py), "");

    assert_eq!(result.suggested_name, "app.py");
    assert_eq!(result.provenance, Provenance::LeadingComment);
}

/// Only the first 3 lines are inspected for a comment filename.
#[test]
fn comment_past_the_first_three_lines_is_ignored() {
    let content = "a = 1\nb = 2\nc = 3\n# late.py\n";
    let result = infer_from_text(&unit(content, LanguageTag::Py), "");

    assert_ne!(result.provenance, Provenance::LeadingComment);
}

/// A shebang line is not treated as a filename-bearing comment.
#[test]
fn shebang_is_not_a_leading_comment() {
    let result = infer_from_text(&unit("#!/usr/bin/env python3.11\nprint(1)", LanguageTag::Py), "");

    assert_ne!(result.provenance, Provenance::LeadingComment);
    assert_eq!(result.suggested_name, "script.py");
    assert_eq!(result.provenance, Provenance::StructuralSignature);
}

#[test]
fn structural_signature_detects_rust_entry_point() {
    let result = infer_from_text(
        &unit("fn main() {\n    println!(\"hi\");\n}", LanguageTag::Rs),
        "",
    );

    assert_eq!(result.suggested_name, "main.rs");
    assert_eq!(result.provenance, Provenance::StructuralSignature);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

/// End-to-end case: a python test function with no other cues.
#[test]
fn python_test_function_maps_to_test_main() {
    let result = infer_from_text(
        &unit("def test_thing():\n    assert True", LanguageTag::Py),
        "",
    );

    assert_eq!(result.suggested_name, "test_main.py");
    assert_eq!(result.provenance, Provenance::StructuralSignature);
    assert_eq!(result.confidence, ConfidenceTier::Medium);
}

#[test]
fn markdown_sibling_heading_names_the_file() {
    let surroundings = Surroundings {
        preceding_blocks: vec!["Some prose".to_string(), "### helpers.sh".to_string()],
        ..Surroundings::default()
    };
    let result = infer_at(&unit("echo hi", LanguageTag::Sh), &surroundings, NOW);

    assert_eq!(result.suggested_name, "helpers.sh");
    assert_eq!(result.provenance, Provenance::MarkdownHeading);
    assert_eq!(result.confidence, ConfidenceTier::High);
}

#[test]
fn markdown_bold_filename_counts() {
    let surroundings = Surroundings {
        preceding_blocks: vec!["**`utils.py`** does the parsing".to_string()],
        ..Surroundings::default()
    };
    let result = infer_at(&unit("import re", LanguageTag::Py), &surroundings, NOW);

    assert_eq!(result.suggested_name, "utils.py");
    assert_eq!(result.provenance, Provenance::MarkdownHeading);
}

/// Only the 3 nearest preceding blocks are consulted.
#[test]
fn markdown_sibling_lookback_is_bounded() {
    let surroundings = Surroundings {
        preceding_blocks: vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "### far_away.sh".to_string(),
        ],
        ..Surroundings::default()
    };
    let result = infer_at(&unit("echo hi", LanguageTag::Sh), &surroundings, NOW);
    assert_ne!(result.provenance, Provenance::MarkdownHeading);
}

/// Captured sibling text flows through the extractor into the chain.
#[test]
fn container_context_feeds_the_conversational_strategy() {
    use codedrop_core::context::ContainerContext;

    let ctx = ContainerContext {
        container_siblings: vec!["save this as src/worker.py".to_string()],
        parent_siblings: vec!["earlier chatter".to_string()],
        ..ContainerContext::default()
    };
    let surroundings = Surroundings::from_container(&ctx);
    let result = infer_at(&unit("import queue", LanguageTag::Py), &surroundings, NOW);

    assert_eq!(result.suggested_name, "src/worker.py");
    assert_eq!(result.provenance, Provenance::ConversationalContext);
}

#[test]
fn generated_name_derives_from_first_declaration() {
    let result = infer_from_text(
        &unit("function parseThing() {\n  return 1;\n}", LanguageTag::Js),
        "",
    );

    assert_eq!(result.suggested_name, "parse_thing.js");
    assert_eq!(result.provenance, Provenance::Generated);
    assert_eq!(result.confidence, ConfidenceTier::Low);
}

/// Struct declarations only feed the generated name for typed languages.
#[test]
fn struct_extraction_is_gated_on_typed_languages() {
    let content = "struct RateLimiter {\n    burst: u32,\n}";

    let typed = infer_from_text(&unit(content, LanguageTag::Rs), "");
    assert_eq!(typed.suggested_name, "rate_limiter.rs");
    assert_eq!(typed.confidence, ConfidenceTier::Low);

    let untyped = infer_at(&unit(content, LanguageTag::Txt), &Surroundings::default(), NOW);
    assert_eq!(untyped.confidence, ConfidenceTier::None);
}

/// With nothing to go on, the engine synthesizes a snippet name.
#[test]
fn generated_fallback_matches_snippet_shape() {
    let result = infer_at(&unit("no identifiers here", LanguageTag::Txt), &Surroundings::default(), NOW);

    let shape = Regex::new(r"^snippet-[0-9a-z]+\.txt$").expect("shape regex");
    assert!(
        shape.is_match(&result.suggested_name),
        "unexpected fallback name: {}",
        result.suggested_name
    );
    assert_eq!(result.provenance, Provenance::Generated);
    assert_eq!(result.confidence, ConfidenceTier::None);
}
