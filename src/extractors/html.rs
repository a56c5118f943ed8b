// src/extractors/html.rs

// --- Imports ---
use crate::extractors::profile::parse_profile_text;
use crate::linkedin::models::ProfileRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

// --- CSS Selectors (Lazy Static) ---
// Multiple selectors per field, covering the public and logged-in LinkedIn
// layouts. First selector with a non-empty match wins.
static NAME_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        r#"h1[data-test="fullName"]"#,
        "h1.text-heading-xlarge",
        "h1.break-words",
        ".pv-text-details__left-panel h1",
        "h1.top-card-layout__title",
    ])
});

static HEADLINE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        ".text-body-medium.break-words",
        ".pv-text-details__left-panel .text-body-medium",
        ".top-card-layout__headline",
        r#"[data-test="headline"]"#,
    ])
});

static LOCATION_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        ".text-body-small.inline.t-black--light.break-words",
        ".pv-text-details__left-panel .text-body-small",
        ".top-card-layout__first-subline",
    ])
});

static SUMMARY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        ".pv-shared-text-with-see-more .break-words span",
        "#about .pv-shared-text-with-see-more",
        ".core-section-container__content .break-words",
    ])
});

static JSON_LD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Failed to compile JSON_LD_SELECTOR")
});

// --- Regex Patterns (Lazy Static) ---
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

// UI chrome that leaks into extracted element text.
static UI_NOISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(LinkedIn Member|View profile|Connect|Message)\b")
        .expect("Failed to compile UI_NOISE_RE")
});

fn compile_selectors(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .filter_map(|pat| Selector::parse(pat).ok())
        .collect()
}

/// Collapses whitespace and strips LinkedIn UI noise from extracted text.
pub fn clean_text(raw: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ");
    UI_NOISE_RE.replace_all(&collapsed, "").trim().to_string()
}

/// Returns the cleaned text of the first selector with a non-empty match.
fn select_first(document: &Html, selectors: &[Selector]) -> Option<String> {
    for selector in selectors {
        if let Some(element) = document.select(selector).next() {
            let text = clean_text(&element.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Fills name/headline from embedded JSON-LD `Person` blocks, if present.
fn apply_json_ld(document: &Html, record: &mut ProfileRecord) {
    for script in document.select(&JSON_LD_SELECTOR) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if data.get("@type").and_then(|t| t.as_str()) != Some("Person") {
            continue;
        }
        if record.name.is_none() {
            if let Some(name) = data.get("name").and_then(|n| n.as_str()) {
                record.name = Some(name.to_string());
            }
        }
        if record.headline.is_none() {
            if let Some(title) = data.get("jobTitle").and_then(|t| t.as_str()) {
                record.headline = Some(title.to_string());
            }
        }
    }
}

/// Reduces a document to the visible text a human would copy-paste from the
/// rendered page: one cleaned line per text node, script/style/head/noscript
/// content excluded.
fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| matches!(el.name(), "script" | "style" | "head" | "noscript"))
        });
        if hidden {
            continue;
        }
        let cleaned = clean_text(text);
        if !cleaned.is_empty() {
            lines.push(cleaned);
        }
    }
    lines.join("\n")
}

/// Extracts a profile record from fetched HTML. Runs the layout-specific
/// selector pass first, then JSON-LD, then reduces the page to visible text
/// and lets the text pipeline fill whatever is still unset. Best effort: an
/// unrecognized layout degrades to a sparse record, never an error.
pub fn extract_from_html(html: &str, url: &str) -> ProfileRecord {
    let document = Html::parse_document(html);

    let mut record = ProfileRecord {
        name: select_first(&document, &NAME_SELECTORS),
        headline: select_first(&document, &HEADLINE_SELECTORS),
        location: select_first(&document, &LOCATION_SELECTORS),
        summary: select_first(&document, &SUMMARY_SELECTORS),
        profile_url: Some(url.to_string()),
        ..ProfileRecord::default()
    };

    apply_json_ld(&document, &mut record);

    // Fall back to the line-based heuristics for anything the selectors
    // missed, and for skills, which have no stable markup.
    let parsed = parse_profile_text(&visible_text(&document));
    record.name = record.name.or(parsed.name);
    record.headline = record.headline.or(parsed.headline);
    record.location = record.location.or(parsed.location);
    record.summary = record.summary.or(parsed.summary);
    record.skills = parsed.skills;

    tracing::info!(
        "Extracted profile from HTML: name={:?}, headline={:?}",
        record.name,
        record.headline
    );

    record
}
