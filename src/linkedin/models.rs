// src/linkedin/models.rs
use serde::{Deserialize, Serialize};

// Default fetch settings, matching what LinkedIn tolerates from a plain
// browser-looking client. All of them can be overridden via FetchConfig.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings for the profile fetch collaborator: header override, per-attempt
/// deadline, pause between attempts, and the attempt ceiling.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub retry_delay_secs: u64,
    pub max_retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Structured output of parsing one profile's text. One record per parse or
/// fetch call; never cached or mutated after construction.
///
/// `experience` and `education` are reserved for future structure and stay
/// empty in the current scope; they serialize as `[]`, never as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<serde_json::Value>,
    #[serde(default)]
    pub education: Vec<serde_json::Value>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub connections: Option<String>,
    pub profile_url: Option<String>,
}
