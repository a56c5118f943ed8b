// src/extractors/profile.rs

// --- Imports ---
use crate::linkedin::models::ProfileRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// --- Constants ---
// How many lines after the name are considered for the headline. Pasted
// profiles put the title directly under the name, so a short window is enough.
const HEADLINE_LOOKAHEAD: usize = 3;

// Employment-style keywords that mark a line as a headline candidate.
const HEADLINE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "consultant",
    "director",
    "specialist",
];

// Country/region words accepted as a location signal on short lines that
// don't fit the "City, Region" comma pattern.
const REGION_KEYWORDS: &[&str] = &[
    "united states",
    "united kingdom",
    "france",
    "germany",
    "canada",
    "australia",
    "india",
    "remote",
];

// Formatter cap, so a 50-endorsement skill dump stays readable.
const MAX_DISPLAYED_SKILLS: usize = 10;

// --- Regex Patterns (Lazy Static) ---
// "City, Region" / "City, Region, Country": capitalized token, then one or
// more comma-separated capitalized tokens, nothing else on the line.
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z .'\-]*(?:,\s*[A-Z][A-Za-z .'\-]*)+$")
        .expect("Failed to compile LOCATION_RE")
});

// Delimiters splitting a skills line into tokens: commas, bullets, pipes,
// semicolons. A line with none of these is treated as a single skill.
static SKILL_DELIM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,•·|;]").expect("Failed to compile SKILL_DELIM_RE"));

// --- Section Markers ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
}

// Marker keywords are matched case-insensitively against whole lines.
const MARKER_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (SectionKind::Summary, &["about", "summary", "à propos"]),
    (
        SectionKind::Skills,
        &["skills", "compétences", "expertise", "technologies"],
    ),
    (SectionKind::Experience, &["experience", "expérience"]),
    (SectionKind::Education, &["education", "formation"]),
];

/// Recognizes a section-marker line. A marker is either the bare keyword
/// ("Skills") or the keyword followed by a colon with inline content
/// ("Skills: Python, SQL"); the content after the colon belongs to the
/// section. Returns the section kind and any inline remainder.
fn match_marker(line: &str) -> Option<(SectionKind, Option<&str>)> {
    let lower = line.trim().to_lowercase();
    for (kind, keywords) in MARKER_KEYWORDS {
        for keyword in *keywords {
            if lower == *keyword {
                return Some((*kind, None));
            }
            if let Some(rest) = lower.strip_prefix(keyword) {
                if rest.starts_with(':') {
                    // Slice the original line to keep the remainder's casing.
                    // get() guards against a boundary mismatch between the
                    // lowercased copy and the original.
                    let tail = line.trim().get(keyword.len() + 1..).map(str::trim);
                    return Some((*kind, tail));
                }
            }
        }
    }
    None
}

// --- Text Segmenter ---

/// Splits raw profile text into ordered, whitespace-trimmed, non-empty lines.
/// Empty input yields an empty sequence; this transformation cannot fail.
pub fn segment_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

// --- Field Classifier ---

#[derive(Debug, Default)]
struct ClassifiedFields {
    name: Option<String>,
    headline: Option<String>,
    location: Option<String>,
}

fn is_headline_candidate(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.contains(" at ") || lower.contains('@') {
        return true;
    }
    HEADLINE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn is_location_candidate(line: &str) -> bool {
    if LOCATION_RE.is_match(line) {
        return true;
    }
    // Keyword fallback only applies to short lines; prose mentioning a
    // country should not become the location.
    let lower = line.to_lowercase();
    line.split_whitespace().count() <= 6 && REGION_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Assigns name, headline, and location from the line sequence. First match
/// wins; an assigned field is never overwritten, and the name line is not
/// reconsidered for the other fields.
fn classify_fields(lines: &[&str]) -> ClassifiedFields {
    let mut fields = ClassifiedFields::default();

    let Some((first, rest)) = lines.split_first() else {
        return fields;
    };
    // The first non-empty line is taken as the name unconditionally.
    fields.name = Some((*first).to_string());

    let mut headline_idx = None;
    for (idx, line) in rest.iter().take(HEADLINE_LOOKAHEAD).enumerate() {
        if match_marker(line).is_some() {
            continue;
        }
        if is_headline_candidate(line) {
            tracing::debug!("Classified headline candidate: '{}'", line);
            fields.headline = Some((*line).to_string());
            headline_idx = Some(idx);
            break;
        }
    }

    for (idx, line) in rest.iter().enumerate() {
        // A line consumed as the headline keeps that role.
        if Some(idx) == headline_idx || match_marker(line).is_some() {
            continue;
        }
        if is_location_candidate(line) {
            tracing::debug!("Classified location candidate: '{}'", line);
            fields.location = Some((*line).to_string());
            break;
        }
    }

    fields
}

// --- Section Extractor ---

#[derive(Debug, Default)]
struct ExtractedSections {
    summary: Option<String>,
    skills: Vec<String>,
}

fn tokenize_skills(lines: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();
    for line in lines {
        for token in SKILL_DELIM_RE.split(line) {
            let token = token.trim().trim_start_matches(['-', '*']).trim();
            if token.is_empty() {
                continue;
            }
            // Dedup case-insensitively, keeping first-seen casing and order.
            if seen.insert(token.to_lowercase()) {
                skills.push(token.to_string());
            }
        }
    }
    skills
}

/// Scans for section markers and collects each section's following lines
/// until the next recognized marker or end of input. The first occurrence of
/// a section wins; later occurrences of an already-populated section are
/// ignored. Experience/Education markers only terminate the running section.
///
/// Known limitation: a skills block whose items span multiple lines without
/// delimiters yields one token per line, which can merge unrelated words
/// into a single skill.
fn extract_sections(lines: &[&str]) -> ExtractedSections {
    let mut sections = ExtractedSections::default();

    let mut i = 0;
    while i < lines.len() {
        let Some((kind, inline)) = match_marker(lines[i]) else {
            i += 1;
            continue;
        };

        let mut body: Vec<&str> = Vec::new();
        if let Some(tail) = inline {
            if !tail.is_empty() {
                body.push(tail);
            }
        }
        let mut j = i + 1;
        while j < lines.len() && match_marker(lines[j]).is_none() {
            body.push(lines[j]);
            j += 1;
        }

        match kind {
            SectionKind::Summary if sections.summary.is_none() => {
                // An empty section still counts as populated.
                sections.summary = Some(body.join(" "));
            }
            SectionKind::Skills if sections.skills.is_empty() => {
                sections.skills = tokenize_skills(&body);
            }
            _ => {
                tracing::trace!("Ignoring section marker '{}' at line {}", lines[i], i);
            }
        }
        i = j;
    }

    sections
}

// --- Record Builder ---

/// Merges classifier and extractor outputs into one record. Defaulting only:
/// anything the prior stages left unset keeps its documented default, so the
/// worst case is an all-default record, never an error.
fn build_record(
    fields: ClassifiedFields,
    sections: ExtractedSections,
    profile_url: Option<String>,
) -> ProfileRecord {
    ProfileRecord {
        name: fields.name,
        headline: fields.headline,
        location: fields.location,
        summary: sections.summary,
        skills: sections.skills,
        profile_url,
        ..ProfileRecord::default()
    }
}

/// Parses raw copy-pasted profile text into a structured record. Total
/// function: malformed or empty input degrades to an all-default record.
pub fn parse_profile_text(text: &str) -> ProfileRecord {
    let lines = segment_lines(text);
    if lines.is_empty() {
        tracing::debug!("Empty profile text, returning default record");
        return ProfileRecord::default();
    }

    let fields = classify_fields(&lines);
    let sections = extract_sections(&lines);
    tracing::info!(
        "Parsed profile text: name={:?}, headline={:?}, {} skills",
        fields.name,
        fields.headline,
        sections.skills.len()
    );

    build_record(fields, sections, None)
}

// --- Formatter ---

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Renders a record into a human-readable summary: fixed field order, fixed
/// label per field, null/empty fields omitted.
pub fn format_profile_summary(record: &ProfileRecord) -> String {
    let mut parts = Vec::new();

    if let Some(name) = non_empty(&record.name) {
        parts.push(format!("**Nom:** {}", name));
    }
    if let Some(headline) = non_empty(&record.headline) {
        parts.push(format!("**Titre:** {}", headline));
    }
    if let Some(location) = non_empty(&record.location) {
        parts.push(format!("**Localisation:** {}", location));
    }
    if let Some(summary) = non_empty(&record.summary) {
        parts.push(format!("**Résumé:** {}", summary));
    }
    if !record.skills.is_empty() {
        let shown: Vec<&str> = record
            .skills
            .iter()
            .take(MAX_DISPLAYED_SKILLS)
            .map(String::as_str)
            .collect();
        parts.push(format!("**Compétences:** {}", shown.join(", ")));
    }

    parts.join("\n\n")
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_name_headline_location() {
        let text = "Jane Smith\nProduct Manager at Acme Corp\nAustin, TX";
        let record = parse_profile_text(text);

        assert_eq!(record.name.as_deref(), Some("Jane Smith"));
        assert_eq!(record.headline.as_deref(), Some("Product Manager at Acme Corp"));
        assert_eq!(record.location.as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn test_empty_input_degrades_to_default_record() {
        let record = parse_profile_text("");
        assert_eq!(record, ProfileRecord::default());
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "John Doe\nSenior Software Engineer at Google\nSan Francisco, California, United States";
        assert_eq!(parse_profile_text(text), parse_profile_text(text));
    }

    #[test]
    fn test_skills_section_splits_on_commas() {
        let text = "Jane Smith\nSkills\nPython, SQL, Leadership";
        let record = parse_profile_text(text);
        assert_eq!(record.skills, vec!["Python", "SQL", "Leadership"]);
    }

    #[test]
    fn test_skills_inline_after_colon() {
        let text = "John Doe\nSkills: Python, JavaScript, React";
        let record = parse_profile_text(text);
        assert_eq!(record.skills, vec!["Python", "JavaScript", "React"]);
    }

    #[test]
    fn test_skills_one_per_line_and_bullets() {
        let text = "Jane Smith\nSkills\n• Python\n• Machine Learning\nLeadership";
        let record = parse_profile_text(text);
        assert_eq!(record.skills, vec!["Python", "Machine Learning", "Leadership"]);
    }

    #[test]
    fn test_duplicate_skills_are_removed_in_order() {
        let text = "Jane Smith\nSkills: Python, SQL, python, Leadership, SQL";
        let record = parse_profile_text(text);
        assert_eq!(record.skills, vec!["Python", "SQL", "Leadership"]);
    }

    #[test]
    fn test_first_about_section_wins() {
        let text = "Jane Smith\nAbout\nFirst summary text.\nSkills\nPython\nAbout\nSecond summary text.";
        let record = parse_profile_text(text);
        assert_eq!(record.summary.as_deref(), Some("First summary text."));
    }

    #[test]
    fn test_about_marker_with_no_content_yields_empty_summary() {
        let text = "Jane Smith\nAbout\nSkills\nPython";
        let record = parse_profile_text(text);
        assert_eq!(record.summary.as_deref(), Some(""));
        assert_eq!(record.skills, vec!["Python"]);
    }

    #[test]
    fn test_summary_joins_lines_until_next_marker() {
        let text = "John Doe\nSenior Software Engineer at Google\nSan Francisco, California, United States\n\
                    About\nExperienced software engineer with 8+ years.\nPassionate about cloud technologies.\n\
                    Skills: Python, AWS\nExperience\n• Senior Software Engineer at Google (2020-Present)";
        let record = parse_profile_text(text);

        assert_eq!(
            record.summary.as_deref(),
            Some("Experienced software engineer with 8+ years. Passionate about cloud technologies.")
        );
        assert_eq!(record.skills, vec!["Python", "AWS"]);
        // Experience is reserved; its marker only terminates the skills block.
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_french_skills_marker() {
        let text = "Marie Dupont\nCompétences: Python, Gestion de projet";
        let record = parse_profile_text(text);
        assert_eq!(record.skills, vec!["Python", "Gestion de projet"]);
    }

    #[test]
    fn test_prose_starting_with_marker_word_is_not_a_marker() {
        let text = "Jane Smith\nAbout\nExperienced analyst with a background in finance.";
        let record = parse_profile_text(text);
        // "Experienced ..." must not open an Experience section.
        assert_eq!(
            record.summary.as_deref(),
            Some("Experienced analyst with a background in finance.")
        );
    }

    #[test]
    fn test_location_keyword_fallback() {
        let text = "Jane Smith\nProduct Manager at Acme Corp\nGreater Paris Area, France";
        let record = parse_profile_text(text);
        assert_eq!(record.location.as_deref(), Some("Greater Paris Area, France"));
    }

    #[test]
    fn test_formatter_orders_and_omits_fields() {
        let record = ProfileRecord {
            name: Some("Jane Smith".to_string()),
            headline: Some("Product Manager at Acme Corp".to_string()),
            skills: vec!["Python".to_string(), "SQL".to_string()],
            ..ProfileRecord::default()
        };
        let summary = format_profile_summary(&record);

        assert_eq!(
            summary,
            "**Nom:** Jane Smith\n\n**Titre:** Product Manager at Acme Corp\n\n**Compétences:** Python, SQL"
        );
        assert!(!summary.contains("**Localisation:**"));
    }

    #[test]
    fn test_formatter_caps_displayed_skills() {
        let record = ProfileRecord {
            skills: (0..15).map(|i| format!("Skill{}", i)).collect(),
            ..ProfileRecord::default()
        };
        let summary = format_profile_summary(&record);
        assert!(summary.contains("Skill9"));
        assert!(!summary.contains("Skill10"));
    }

    #[test]
    fn test_segmenter_trims_and_drops_blank_lines() {
        let lines = segment_lines("  Jane Smith  \n\n\t\n Austin, TX \n");
        assert_eq!(lines, vec!["Jane Smith", "Austin, TX"]);
    }
}
