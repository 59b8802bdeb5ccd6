//! Language classification from style/markup hints.
//!
//! Chat UIs tag code containers with highlighter classes such as
//! `language-rust` or `hljs python`. The classifier maps that hint string
//! (container classes plus the nearest enclosing block's classes,
//! concatenated by the caller) to a short language tag. It never inspects
//! the code itself.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed language vocabulary. Each tag doubles as the file extension the
/// generated-default strategy appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Rs,
    Js,
    Ts,
    Py,
    Sh,
    Json,
    Yaml,
    Toml,
    Sql,
    Html,
    Css,
    Md,
    Go,
    Java,
    Cpp,
    Rb,
    Php,
    Swift,
    Kt,
    Dockerfile,
    /// Generic fallback when no hint matched.
    Txt,
}

impl LanguageTag {
    /// The file extension for this tag.
    pub fn ext(self) -> &'static str {
        match self {
            LanguageTag::Rs => "rs",
            LanguageTag::Js => "js",
            LanguageTag::Ts => "ts",
            LanguageTag::Py => "py",
            LanguageTag::Sh => "sh",
            LanguageTag::Json => "json",
            LanguageTag::Yaml => "yaml",
            LanguageTag::Toml => "toml",
            LanguageTag::Sql => "sql",
            LanguageTag::Html => "html",
            LanguageTag::Css => "css",
            LanguageTag::Md => "md",
            LanguageTag::Go => "go",
            LanguageTag::Java => "java",
            LanguageTag::Cpp => "cpp",
            LanguageTag::Rb => "rb",
            LanguageTag::Php => "php",
            LanguageTag::Swift => "swift",
            LanguageTag::Kt => "kt",
            LanguageTag::Dockerfile => "dockerfile",
            LanguageTag::Txt => "txt",
        }
    }

    /// Parse a tag from its short form (`"rs"`, `"py"`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let all = [
            LanguageTag::Rs,
            LanguageTag::Js,
            LanguageTag::Ts,
            LanguageTag::Py,
            LanguageTag::Sh,
            LanguageTag::Json,
            LanguageTag::Yaml,
            LanguageTag::Toml,
            LanguageTag::Sql,
            LanguageTag::Html,
            LanguageTag::Css,
            LanguageTag::Md,
            LanguageTag::Go,
            LanguageTag::Java,
            LanguageTag::Cpp,
            LanguageTag::Rb,
            LanguageTag::Php,
            LanguageTag::Swift,
            LanguageTag::Kt,
            LanguageTag::Dockerfile,
            LanguageTag::Txt,
        ];
        let lower = tag.to_ascii_lowercase();
        all.into_iter().find(|t| t.ext() == lower)
    }

    /// Whether the language idiomatically declares named types. Gates the
    /// struct/enum extraction of the generated-default strategy.
    pub fn is_typed(self) -> bool {
        matches!(
            self,
            LanguageTag::Rs
                | LanguageTag::Go
                | LanguageTag::Java
                | LanguageTag::Cpp
                | LanguageTag::Ts
                | LanguageTag::Kt
                | LanguageTag::Swift
        )
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ext())
    }
}

/// Ordered hint patterns; first match wins. Order mirrors how specific the
/// highlighter class names are in practice (e.g. `typescript` must be
/// listed so plain `ts` hints still resolve, `java` must not swallow
/// `javascript`, which word boundaries already prevent).
static HINT_RULES: Lazy<Vec<(Regex, LanguageTag)>> = Lazy::new(|| {
    [
        (r"\b(rust|rs)\b", LanguageTag::Rs),
        (r"\b(javascript|jsx?)\b", LanguageTag::Js),
        (r"\b(typescript|tsx?)\b", LanguageTag::Ts),
        (r"\b(python|py)\b", LanguageTag::Py),
        (r"\b(bash|shell|zsh|sh)\b", LanguageTag::Sh),
        (r"\b(json|jsonc)\b", LanguageTag::Json),
        (r"\b(yaml|yml)\b", LanguageTag::Yaml),
        (r"\btoml\b", LanguageTag::Toml),
        (r"\bsql\b", LanguageTag::Sql),
        (r"\b(html|xhtml)\b", LanguageTag::Html),
        (r"\b(css|scss|less)\b", LanguageTag::Css),
        (r"\b(markdown|md)\b", LanguageTag::Md),
        (r"\b(golang|go)\b", LanguageTag::Go),
        (r"\bjava\b", LanguageTag::Java),
        (r"\b(cpp|cxx|cc)\b|\bc\+\+", LanguageTag::Cpp),
        (r"\b(ruby|rb)\b", LanguageTag::Rb),
        (r"\bphp\b", LanguageTag::Php),
        (r"\bswift\b", LanguageTag::Swift),
        (r"\b(kotlin|kts?)\b", LanguageTag::Kt),
        (r"\bdockerfile\b", LanguageTag::Dockerfile),
    ]
    .into_iter()
    .map(|(pattern, tag)| {
        let re = Regex::new(&format!("(?i){pattern}")).expect("hint pattern compiles");
        (re, tag)
    })
    .collect()
});

/// Map a style/markup hint string to a language tag.
///
/// Total and deterministic: unmatched input yields [`LanguageTag::Txt`].
pub fn classify(signals: &str) -> LanguageTag {
    for (pattern, tag) in HINT_RULES.iter() {
        if pattern.is_match(signals) {
            return *tag;
        }
    }
    LanguageTag::Txt
}
