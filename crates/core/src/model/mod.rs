//! Core data model for captured code units, detection results, and
//! configured save destinations.

use serde::{Deserialize, Serialize};

use crate::classify::LanguageTag;

/// A captured code block plus its classified language tag.
///
/// Produced once per save action and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeUnit {
    /// The raw text of the code container.
    pub content: String,
    /// Classified language, or [`LanguageTag::Txt`] when nothing matched.
    pub language: LanguageTag,
}

impl CodeUnit {
    pub fn new(content: impl Into<String>, language: LanguageTag) -> Self {
        Self { content: content.into(), language }
    }
}

/// Which detection strategy produced a suggested filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    ExplicitMarker,
    ConversationalContext,
    LeadingComment,
    StructuralSignature,
    MarkdownHeading,
    Generated,
}

/// Advisory trust label on a suggestion. Never gates a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    None,
}

/// Outcome of one inference attempt. Exactly one is produced per
/// [`CodeUnit`] per attempt; `suggested_name` is always non-empty and
/// carries a file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub suggested_name: String,
    pub provenance: Provenance,
    pub confidence: ConfidenceTier,
}

impl DetectionResult {
    pub fn new(
        suggested_name: impl Into<String>,
        provenance: Provenance,
        confidence: ConfidenceTier,
    ) -> Self {
        Self { suggested_name: suggested_name.into(), provenance, confidence }
    }
}

/// Everything the inference engine may consult besides the code itself.
///
/// Frontends capture this from the document around the code container;
/// the engine itself performs no document access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surroundings {
    /// Whole text of a label element immediately preceding the container.
    pub label: Option<String>,
    /// Value of a file-identifying attribute on the container
    /// (e.g. `data-filename`).
    pub file_attribute: Option<String>,
    /// Text of preceding sibling blocks, nearest first.
    pub preceding_blocks: Vec<String>,
    /// Flattened surrounding text, usually produced by
    /// [`crate::context::surrounding_text`].
    pub context_text: String,
}

impl Surroundings {
    /// Surroundings carrying only flattened context text.
    pub fn from_context_text(text: impl Into<String>) -> Self {
        Self { context_text: text.into(), ..Self::default() }
    }

    /// Build surroundings from captured sibling text: the flattened window
    /// comes from the context extractor, and the container's own siblings
    /// double as the blocks the markdown strategy inspects.
    pub fn from_container(ctx: &crate::context::ContainerContext) -> Self {
        Self {
            preceding_blocks: ctx.container_siblings.clone(),
            context_text: crate::context::surrounding_text(ctx),
            ..Self::default()
        }
    }
}

/// A configured save target. The `id` is opaque to the inference core;
/// only the frontends interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    /// Human-friendly display name.
    pub name: String,
    /// Absolute root directory files are saved under.
    pub root: String,
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), root: root.into() }
    }
}
