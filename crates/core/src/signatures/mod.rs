//! Structural signature table: content-pattern rules recognizing canonical
//! file roles from code idioms.
//!
//! The table is static, read-only data; declaration order is part of the
//! contract (first successful rule wins). Each rule either yields a fixed
//! filename or derives one through a named pure function. A derivation
//! returning `None` declines the match and the scan continues.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::classify::LanguageTag;
use crate::model::{CodeUnit, ConfidenceTier};

/// How a matched rule produces a filename.
enum NameRule {
    /// The rule always yields this exact name.
    Fixed(&'static str),
    /// The rule derives a name from the match and the language tag.
    Derived(fn(&Captures<'_>, LanguageTag) -> Option<String>),
}

/// One content-pattern rule, optionally gated by a required language tag.
struct SignatureRule {
    pattern: Regex,
    required_tag: Option<LanguageTag>,
    name: NameRule,
    confidence: ConfidenceTier,
}

impl SignatureRule {
    fn new(
        pattern: &str,
        required_tag: Option<LanguageTag>,
        name: NameRule,
        confidence: ConfidenceTier,
    ) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("signature pattern compiles"),
            required_tag,
            name,
            confidence,
        }
    }
}

/// Run the ordered signature table against a code unit.
///
/// Returns the derived filename and the matched rule's confidence, or
/// `None` when no rule applies.
pub fn match_signature(unit: &CodeUnit) -> Option<(String, ConfidenceTier)> {
    for rule in RULES.iter() {
        if let Some(required) = rule.required_tag {
            if unit.language != required {
                continue;
            }
        }
        let Some(caps) = rule.pattern.captures(&unit.content) else {
            continue;
        };
        let name = match rule.name {
            NameRule::Fixed(name) => name.to_string(),
            NameRule::Derived(derive) => match derive(&caps, unit.language) {
                Some(name) => name,
                // Declined derivation: not a match, keep scanning.
                None => continue,
            },
        };
        return Some((name, rule.confidence));
    }
    None
}

/// Convert an identifier to lower-case underscore convention.
///
/// Acronym runs stay together: `HTTPServer` -> `http_server`.
pub(crate) fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_joins = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (chars[i - 1].is_uppercase()
                        && chars.get(i + 1).is_some_and(|n| n.is_lowercase())));
            if prev_joins {
                out.push('_');
            }
            for lower in c.to_lowercase() {
                out.push(lower);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn derive_js_test(_caps: &Captures<'_>, tag: LanguageTag) -> Option<String> {
    match tag {
        LanguageTag::Js => Some("main.test.js".to_string()),
        LanguageTag::Ts => Some("main.test.ts".to_string()),
        _ => None,
    }
}

fn derive_component(caps: &Captures<'_>, tag: LanguageTag) -> Option<String> {
    let ident = caps.get(1)?.as_str();
    // Components are PascalCase; anything else is an ordinary function.
    if !ident.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    let ext = match tag {
        LanguageTag::Js => "jsx",
        LanguageTag::Ts => "tsx",
        _ => return None,
    };
    Some(format!("{}.{ext}", to_snake_case(ident)))
}

fn derive_react_app(_caps: &Captures<'_>, tag: LanguageTag) -> Option<String> {
    match tag {
        LanguageTag::Js => Some("app.jsx".to_string()),
        LanguageTag::Ts => Some("app.tsx".to_string()),
        _ => None,
    }
}

fn derive_server_entry(_caps: &Captures<'_>, tag: LanguageTag) -> Option<String> {
    match tag {
        LanguageTag::Js => Some("server.js".to_string()),
        LanguageTag::Ts => Some("server.ts".to_string()),
        _ => None,
    }
}

/// The ordered rule table: entry points, test modules, framework imports,
/// config markers, markup, shebangs, stylesheets, SQL.
static RULES: Lazy<Vec<SignatureRule>> = Lazy::new(|| {
    use ConfidenceTier::{High, Medium};
    use LanguageTag::{Cpp, Css, Go, Html, Java, Json, Md, Py, Rs, Sql, Toml, Yaml};

    vec![
        // Language entry points.
        SignatureRule::new(
            r"(?m)^\s*(?:pub\s+)?(?:async\s+)?fn\s+main\s*\(",
            Some(Rs),
            NameRule::Fixed("main.rs"),
            High,
        ),
        SignatureRule::new(
            r#"(?m)^if\s+__name__\s*==\s*["']__main__["']"#,
            Some(Py),
            NameRule::Fixed("main.py"),
            High,
        ),
        SignatureRule::new(
            r"(?m)^func\s+main\s*\(\s*\)",
            Some(Go),
            NameRule::Fixed("main.go"),
            High,
        ),
        SignatureRule::new(
            r"public\s+static\s+void\s+main\s*\(",
            Some(Java),
            NameRule::Fixed("Main.java"),
            High,
        ),
        SignatureRule::new(
            r"(?m)^\s*int\s+main\s*\(",
            Some(Cpp),
            NameRule::Fixed("main.cpp"),
            High,
        ),
        // Test modules.
        SignatureRule::new(
            r"#\[(?:cfg\(test\)|test)\]",
            Some(Rs),
            NameRule::Fixed("tests.rs"),
            Medium,
        ),
        SignatureRule::new(
            r"(?m)^def\s+test_\w+\s*\(",
            Some(Py),
            NameRule::Fixed("test_main.py"),
            Medium,
        ),
        SignatureRule::new(
            r#"(?m)^\s*(?:describe|it|test)\s*\(\s*["']"#,
            None,
            NameRule::Derived(derive_js_test),
            Medium,
        ),
        // Framework idioms.
        SignatureRule::new(
            r"(?m)^\s*export\s+default\s+(?:function|class)\s+([A-Za-z_]\w*)",
            None,
            NameRule::Derived(derive_component),
            Medium,
        ),
        SignatureRule::new(
            r#"(?m)^\s*import\s+React\b|from\s+["']react["']"#,
            None,
            NameRule::Derived(derive_react_app),
            Medium,
        ),
        SignatureRule::new(
            r#"require\(\s*["']express["']\s*\)|from\s+["']express["']"#,
            None,
            NameRule::Derived(derive_server_entry),
            Medium,
        ),
        SignatureRule::new(
            r"(?m)^from\s+flask\s+import\b|Flask\(__name__\)",
            Some(Py),
            NameRule::Fixed("app.py"),
            Medium,
        ),
        SignatureRule::new(
            r"(?m)^use\s+(?:actix_web|axum|rocket)\b",
            Some(Rs),
            NameRule::Fixed("main.rs"),
            Medium,
        ),
        // Config-file structural markers.
        SignatureRule::new(
            r"(?m)^\s*\[package\]",
            Some(Toml),
            NameRule::Fixed("Cargo.toml"),
            High,
        ),
        SignatureRule::new(
            r"(?m)^\s*\[(?:dependencies|workspace)\]",
            Some(Toml),
            NameRule::Fixed("Cargo.toml"),
            Medium,
        ),
        SignatureRule::new(
            r#""(?:dependencies|devDependencies|scripts)"\s*:"#,
            Some(Json),
            NameRule::Fixed("package.json"),
            High,
        ),
        SignatureRule::new(
            r#""compilerOptions"\s*:"#,
            Some(Json),
            NameRule::Fixed("tsconfig.json"),
            High,
        ),
        SignatureRule::new(
            r"(?m)^services:\s*$",
            Some(Yaml),
            NameRule::Fixed("docker-compose.yml"),
            High,
        ),
        // Markup / document idioms.
        SignatureRule::new(
            r"(?i)^\s*<!doctype\s+html",
            None,
            NameRule::Fixed("index.html"),
            High,
        ),
        SignatureRule::new(
            r"(?i)<html[\s>]",
            Some(Html),
            NameRule::Fixed("index.html"),
            Medium,
        ),
        SignatureRule::new(r"(?m)^#\s+\S", Some(Md), NameRule::Fixed("README.md"), Medium),
        // Shebang lines.
        SignatureRule::new(
            r"^#!.*\b(?:bash|zsh|sh)\b",
            None,
            NameRule::Fixed("script.sh"),
            Medium,
        ),
        SignatureRule::new(r"^#!.*\bpython", None, NameRule::Fixed("script.py"), Medium),
        SignatureRule::new(r"^#!.*\bnode\b", None, NameRule::Fixed("script.js"), Medium),
        SignatureRule::new(r"^#!.*\bruby\b", None, NameRule::Fixed("script.rb"), Medium),
        // Stylesheet idioms.
        SignatureRule::new(
            r"(?m)^\s*(?::root|html|body)\s*\{",
            Some(Css),
            NameRule::Fixed("styles.css"),
            Medium,
        ),
        SignatureRule::new(
            r"(?m)^\s*@(?:import|media|charset)\b",
            Some(Css),
            NameRule::Fixed("styles.css"),
            Medium,
        ),
        // SQL statement idioms.
        SignatureRule::new(
            r"(?i)\bcreate\s+table\b",
            Some(Sql),
            NameRule::Fixed("schema.sql"),
            High,
        ),
        SignatureRule::new(
            r"(?i)\binsert\s+into\b",
            Some(Sql),
            NameRule::Fixed("seed.sql"),
            Medium,
        ),
        SignatureRule::new(
            r"(?is)\bselect\b.+?\bfrom\b",
            Some(Sql),
            NameRule::Fixed("query.sql"),
            Medium,
        ),
    ]
});
