use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use codedrop_core::classify::{self, LanguageTag};
use codedrop_core::infer::infer_from_text;
use codedrop_core::model::{CodeUnit, ConfidenceTier, DetectionResult, Provenance};
use codedrop_core::suggest::suggest_path;

use crate::open_store;

/// One suggestion, ready for JSON output.
#[derive(Serialize)]
pub struct SuggestReport {
    pub suggested_name: String,
    pub provenance: Provenance,
    pub confidence: ConfidenceTier,
    pub language: LanguageTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Default relative path after directory biasing.
    pub path: String,
}

/// Infer a filename for a block of code and print the default save path.
pub fn suggest_command(
    store_flag: Option<&str>,
    file: Option<&str>,
    context: &str,
    hint: Option<&str>,
    lang: Option<&str>,
    destination: Option<&str>,
    json: bool,
) -> Result<()> {
    let content = read_input(file)?;

    let language = match lang {
        Some(tag) => LanguageTag::from_tag(tag)
            .ok_or_else(|| anyhow::anyhow!("Unknown language tag: {tag}"))?,
        None => classify::classify(hint.unwrap_or_default()),
    };

    let unit = CodeUnit::new(content, language);
    let detection = infer_from_text(&unit, context);

    let (_path, store) = open_store(store_flag)?;
    let destination = match destination {
        Some(id) => Some(id.to_string()),
        None => store.default_destination().context("Failed to read default destination")?,
    };
    let path = match destination.as_deref() {
        Some(id) => suggest_path(&store, &detection, id),
        None => detection.suggested_name.clone(),
    };

    let report = SuggestReport {
        suggested_name: detection.suggested_name.clone(),
        provenance: detection.provenance,
        confidence: detection.confidence,
        language,
        destination,
        path,
    };

    if json {
        let serialized = serde_json::to_string_pretty(&report)
            .context("Failed to serialize suggestion to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    print_report(&report, &detection);
    Ok(())
}

fn print_report(report: &SuggestReport, detection: &DetectionResult) {
    println!("Suggested name: {}", detection.suggested_name);
    println!("  Provenance: {}", provenance_label(detection.provenance));
    println!("  Confidence: {}", confidence_label(detection.confidence));
    println!("  Language:   {}", report.language);
    match &report.destination {
        Some(id) => println!("  Path ({id}): {}", report.path),
        None => println!("  Path: {}", report.path),
    }
}

fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::ExplicitMarker => "explicit-marker",
        Provenance::ConversationalContext => "conversational-context",
        Provenance::LeadingComment => "leading-comment",
        Provenance::StructuralSignature => "structural-signature",
        Provenance::MarkdownHeading => "markdown-heading",
        Provenance::Generated => "generated",
    }
}

fn confidence_label(confidence: ConfidenceTier) -> &'static str {
    match confidence {
        ConfidenceTier::High => "high",
        ConfidenceTier::Medium => "medium",
        ConfidenceTier::Low => "low",
        ConfidenceTier::None => "none",
    }
}

/// Read the code block from a file, or stdin when no file was given.
pub(crate) fn read_input(file: Option<&str>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read input file {path}"))
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read code from stdin")?;
            if content.is_empty() {
                bail!("No input: pass --file or pipe content on stdin");
            }
            Ok(content)
        }
    }
}
