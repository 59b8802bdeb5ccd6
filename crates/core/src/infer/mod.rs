//! Filename inference engine.
//!
//! Runs a fixed, ordered chain of detection strategies over a code unit
//! and its surroundings; the first strategy to produce a validated name
//! wins. The chain always terminates in a result: the generated-default
//! strategy cannot fail.
//!
//! The chain is a closed list of pure functions (no dynamic dispatch, no
//! process-wide state), so identical inputs always produce identical
//! results. The only time-dependent piece, the generated fallback name,
//! takes its timestamp as an explicit argument via [`infer_at`].

mod validate;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{CodeUnit, ConfidenceTier, DetectionResult, Provenance, Surroundings};
use crate::signatures::{self, to_snake_case};
use validate::is_valid_filename;

type Strategy = fn(&CodeUnit, &Surroundings) -> Option<DetectionResult>;

/// Ordered strategy chain; order is part of the contract.
const STRATEGIES: &[Strategy] = &[
    explicit_marker,
    conversational_context,
    leading_comment,
    structural_signature,
    markdown_context,
];

/// Infer a filename for `unit`. Never fails.
pub fn infer(unit: &CodeUnit, surroundings: &Surroundings) -> DetectionResult {
    infer_at(unit, surroundings, Utc::now().timestamp_millis())
}

/// Convenience for callers that only carry flattened context text.
pub fn infer_from_text(unit: &CodeUnit, context_text: &str) -> DetectionResult {
    infer(unit, &Surroundings::from_context_text(context_text))
}

/// Deterministic entry point: `now_millis` feeds only the generated
/// fallback name, so tests can pin it.
pub fn infer_at(unit: &CodeUnit, surroundings: &Surroundings, now_millis: i64) -> DetectionResult {
    for strategy in STRATEGIES {
        if let Some(result) = strategy(unit, surroundings) {
            return result;
        }
    }
    generated_default(unit, now_millis)
}

/// Strategy 1: a label element immediately preceding the container whose
/// whole text is a bare filename, or a file-identifying attribute on the
/// container itself.
fn explicit_marker(_unit: &CodeUnit, surroundings: &Surroundings) -> Option<DetectionResult> {
    if let Some(label) = surroundings.label.as_deref() {
        let text = label.trim();
        if is_bare_filename(text) {
            return Some(DetectionResult::new(
                text,
                Provenance::ExplicitMarker,
                ConfidenceTier::High,
            ));
        }
    }
    if let Some(attr) = surroundings.file_attribute.as_deref() {
        let text = attr.trim();
        // Attributes may carry a relative path, not just a bare name.
        if !text.contains(char::is_whitespace) && is_valid_filename(text) {
            return Some(DetectionResult::new(
                text,
                Provenance::ExplicitMarker,
                ConfidenceTier::High,
            ));
        }
    }
    None
}

/// Ordered natural-language patterns over the flattened context text.
/// Group 1 of every pattern is the candidate token.
static CONTEXT_PATTERNS: Lazy<Vec<(Regex, ConfidenceTier)>> = Lazy::new(|| {
    use ConfidenceTier::{High, Low, Medium};

    [
        // "save it to x.rs" / "create src/app.ts" / "write this as run.sh"
        (
            r#"(?i)\b(?:save|create|write)\b(?:\s+\w+){0,3}?\s+(?:(?:to|as|in|into|at)\s+)?[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            High,
        ),
        // "filename: x.py" / "file = x.py"
        (
            r#"(?i)\b(?:file\s*name|filename|file|name)\s*[:=]\s*[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            High,
        ),
        // "called x.py" / "named x.py"
        (
            r#"(?i)\b(?:called|named|call\s+it|name\s+it)\s+[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            High,
        ),
        // "update config.yaml" / "modify the existing main.py"
        (
            r#"(?i)\b(?:update|modify|edit|change)\b(?:\s+(?:the|your|existing|file))*\s+[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            High,
        ),
        // "here's the updated main.py"
        (
            r#"(?i)\bhere(?:'s|\s+is)\s+(?:the|a|an|your)\s+(?:\w+\s+){0,2}?[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            Medium,
        ),
        // Quoted token that carries a directory.
        (
            r#"[`'"]([A-Za-z0-9_\-.]*/[A-Za-z0-9_\-./]*\.[A-Za-z0-9]+)[`'"]"#,
            Medium,
        ),
        // Quoted bare filename.
        (r#"[`'"]([A-Za-z0-9_\-.]+\.[A-Za-z0-9]+)[`'"]"#, Low),
        // "in src/util.py"
        (
            r#"(?i)\bin\s+[`'"]?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)[`'"]?"#,
            Medium,
        ),
        // A markdown heading that is itself a bare filename.
        (r"(?m)^\s*#{1,6}\s+([A-Za-z0-9_\-.]+\.[A-Za-z0-9]+)\s*$", High),
    ]
    .into_iter()
    .map(|(pattern, confidence)| {
        let re = Regex::new(pattern).expect("context pattern compiles");
        (re, confidence)
    })
    .collect()
});

/// Strategy 2: conversational phrasing in the surrounding text. The first
/// pattern whose captured token passes validation wins; a rejected capture
/// is a non-match and the scan continues.
fn conversational_context(_unit: &CodeUnit, surroundings: &Surroundings) -> Option<DetectionResult> {
    let text = surroundings.context_text.as_str();
    if text.is_empty() {
        return None;
    }
    for (pattern, confidence) in CONTEXT_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(token) = caps.get(1) else { continue };
            if is_valid_filename(token.as_str()) {
                return Some(DetectionResult::new(
                    token.as_str(),
                    Provenance::ConversationalContext,
                    *confidence,
                ));
            }
        }
    }
    None
}

/// Same-line comment carrying a filename, with an optional `@file` /
/// `file:` label.
static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?://+|#|--|;|/\*+|<!--)\s*(?:@file\s+|(?i:file(?:name)?)\s*:\s*)?([A-Za-z0-9_\-./]+\.[A-Za-z0-9]+)",
    )
    .expect("comment pattern compiles")
});

/// Strategy 3: a filename in a comment within the first 3 lines.
fn leading_comment(unit: &CodeUnit, _surroundings: &Surroundings) -> Option<DetectionResult> {
    for line in unit.content.lines().take(3) {
        // Shebangs belong to the signature table, not to comments.
        if line.starts_with("#!") {
            continue;
        }
        let Some(caps) = COMMENT_LINE.captures(line) else {
            continue;
        };
        let token = caps.get(1)?.as_str();
        if is_valid_filename(token) {
            return Some(DetectionResult::new(
                token,
                Provenance::LeadingComment,
                ConfidenceTier::High,
            ));
        }
    }
    None
}

/// Strategy 4: the structural signature table.
fn structural_signature(unit: &CodeUnit, _surroundings: &Surroundings) -> Option<DetectionResult> {
    let (name, confidence) = signatures::match_signature(unit)?;
    Some(DetectionResult::new(name, Provenance::StructuralSignature, confidence))
}

static MD_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*#{1,6}\s+`?([A-Za-z0-9_\-.]+\.[A-Za-z0-9]+)`?\s*$")
        .expect("heading pattern compiles")
});

static MD_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("bold pattern compiles"));

static MD_FILE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfile\s*:\s*`?([A-Za-z0-9_\-.]+\.[A-Za-z0-9]+)`?")
        .expect("file-label pattern compiles")
});

/// Strategy 5: markdown structure in the nearest preceding siblings -- a
/// heading, bold text, or `File: <name>` label that is a bare filename.
fn markdown_context(_unit: &CodeUnit, surroundings: &Surroundings) -> Option<DetectionResult> {
    for block in surroundings.preceding_blocks.iter().take(3) {
        for pattern in [&MD_HEADING, &MD_FILE_LABEL] {
            if let Some(caps) = pattern.captures(block) {
                let token = caps.get(1).map(|m| m.as_str())?;
                if is_bare_filename(token) {
                    return Some(DetectionResult::new(
                        token,
                        Provenance::MarkdownHeading,
                        ConfidenceTier::High,
                    ));
                }
            }
        }
        if let Some(caps) = MD_BOLD.captures(block) {
            let token = caps.get(1).map(|m| m.as_str())?.trim().trim_matches('`');
            if is_bare_filename(token) {
                return Some(DetectionResult::new(
                    token,
                    Provenance::MarkdownHeading,
                    ConfidenceTier::High,
                ));
            }
        }
    }
    None
}

/// Ordered declaration patterns for the generated-default identifier.
static DECLARATIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+([A-Za-z_]\w*)",
        r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)",
        r"(?m)^\s*(?:export\s+)?(?:public\s+|abstract\s+|final\s+)?class\s+([A-Za-z_]\w*)",
        r"(?m)^\s*(?:async\s+)?def\s+([A-Za-z_]\w*)",
        r"(?m)^\s*(?:export\s+)?const\s+([A-Za-z_$][\w$]*)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("declaration pattern compiles"))
    .collect()
});

/// Additional declaration patterns attempted only for typed languages.
static TYPED_DECLARATIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+([A-Za-z_]\w*)",
        r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?enum\s+([A-Za-z_]\w*)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("declaration pattern compiles"))
    .collect()
});

/// Strategy 6: derive a name from the first declared identifier, or
/// synthesize a snippet name. Always succeeds.
fn generated_default(unit: &CodeUnit, now_millis: i64) -> DetectionResult {
    let ext = unit.language.ext();

    let typed_extra: &[Regex] = if unit.language.is_typed() {
        TYPED_DECLARATIONS.as_slice()
    } else {
        &[]
    };
    for pattern in DECLARATIONS.iter().chain(typed_extra) {
        if let Some(caps) = pattern.captures(&unit.content) {
            if let Some(ident) = caps.get(1) {
                return DetectionResult::new(
                    format!("{}.{ext}", to_snake_case(ident.as_str())),
                    Provenance::Generated,
                    ConfidenceTier::Low,
                );
            }
        }
    }

    DetectionResult::new(
        format!("snippet-{}.{ext}", base36(now_millis)),
        Provenance::Generated,
        ConfidenceTier::None,
    )
}

/// A filename with no directory part and no whitespace.
fn is_bare_filename(text: &str) -> bool {
    !text.is_empty()
        && !text.contains('/')
        && !text.contains(char::is_whitespace)
        && is_valid_filename(text)
}

/// Lower-case base-36 rendering of a non-negative value.
fn base36(mut value: i64) -> String {
    if value <= 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while value > 0 {
        let digit = (value % 36) as u32;
        out.insert(0, char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(46_655), "zzz");
    }

    #[test]
    fn bare_filename_excludes_paths_and_spaces() {
        assert!(is_bare_filename("main.rs"));
        assert!(!is_bare_filename("src/main.rs"));
        assert!(!is_bare_filename("my file.rs"));
    }
}
