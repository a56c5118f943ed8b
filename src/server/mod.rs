// src/server/mod.rs
use crate::extractors::{format_profile_summary, parse_profile_text};
use crate::linkedin::models::{FetchConfig, ProfileRecord};
use crate::linkedin::ProfileClient;
use crate::utils::AppError;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ProfileClient>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub profile_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub profile_data: ProfileRecord,
    pub formatted_summary: String,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub url: String,
    pub profile_data: Option<ProfileRecord>,
    pub formatted_summary: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /linkedin/parse. Parsing never fails, so this always reports
/// success; malformed input degrades to a mostly-empty record.
async fn parse_profile(Json(request): Json<ParseRequest>) -> Json<ParseResponse> {
    let record = parse_profile_text(&request.profile_text);
    let formatted_summary = format_profile_summary(&record);
    Json(ParseResponse {
        profile_data: record,
        formatted_summary,
        success: true,
    })
}

/// POST /linkedin/scrape. Fetch errors are converted here into
/// `success: false` responses that echo the requested URL; they never
/// surface as HTTP-level failures.
async fn scrape_profile(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Json<ScrapeResponse> {
    match state.client.fetch_and_parse(&request.url).await {
        Ok(record) => {
            let formatted_summary = format_profile_summary(&record);
            Json(ScrapeResponse {
                url: request.url,
                profile_data: Some(record),
                formatted_summary: Some(formatted_summary),
                success: true,
                error: None,
            })
        }
        Err(err) => {
            tracing::error!("Scrape failed for {}: {}", request.url, err);
            Json(ScrapeResponse {
                url: request.url,
                profile_data: None,
                formatted_summary: None,
                success: false,
                error: Some(err.to_string()),
            })
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/linkedin/parse", post(parse_profile))
        .route("/linkedin/scrape", post(scrape_profile))
        .with_state(state)
}

pub async fn run_server(host: &str, port: u16, config: FetchConfig) -> Result<(), AppError> {
    let client = ProfileClient::new(config)?;
    let state = AppState {
        client: Arc::new(client),
    };
    let app = build_router(state);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}:{} - {}", host, port, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let config = FetchConfig {
            retry_delay_secs: 0,
            ..FetchConfig::default()
        };
        AppState {
            client: Arc::new(ProfileClient::new(config).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_parse_endpoint_returns_classified_fields() {
        let request = ParseRequest {
            profile_text: "Jane Smith\nProduct Manager at Acme Corp\nAustin, TX".to_string(),
        };
        let Json(response) = parse_profile(Json(request)).await;

        assert!(response.success);
        assert_eq!(response.profile_data.name.as_deref(), Some("Jane Smith"));
        assert!(response.formatted_summary.contains("**Nom:** Jane Smith"));
    }

    #[tokio::test]
    async fn test_parse_endpoint_reports_success_for_empty_input() {
        let request = ParseRequest {
            profile_text: String::new(),
        };
        let Json(response) = parse_profile(Json(request)).await;

        assert!(response.success);
        assert_eq!(response.profile_data, ProfileRecord::default());
        assert_eq!(response.formatted_summary, "");
    }

    #[tokio::test]
    async fn test_scrape_endpoint_converts_invalid_url_to_failure_response() {
        let request = ScrapeRequest {
            url: "not a url".to_string(),
        };
        let Json(response) = scrape_profile(State(test_state()), Json(request)).await;

        assert!(!response.success);
        assert_eq!(response.url, "not a url");
        assert!(response.profile_data.is_none());
        assert!(response.error.unwrap().contains("Invalid LinkedIn profile URL"));
    }
}
