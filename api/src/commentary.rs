use crate::MatchState;
use crate::gemini::{GenerateRequest, GenerateResponse};
use log::{debug, error};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const GENERATIVE_API: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Shown when the model answers with nothing usable.
pub const EMPTY_FALLBACK: &str = "The atmosphere is electric as the game continues!";
/// Shown when the request could not be made or failed.
pub const ERROR_FALLBACK: &str = "What a spectacle we're witnessing today!";

/// One-line live commentary from a hosted text-generation model.
#[derive(Debug, Clone)]
pub struct CommentaryClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl Default for CommentaryClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("matchday/0.1 (terminal match tracker)")
                .build()
                .unwrap_or_default(),
            base_url: GENERATIVE_API.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    MissingApiKey,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::MissingApiKey => write!(f, "no API key configured"),
        }
    }
}

impl std::error::Error for ApiError {}

impl CommentaryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank keys are treated as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Best effort: always returns a sentence, falling back to a stock line on
    /// an empty answer or any failure.
    pub async fn generate(&self, state: &MatchState) -> String {
        fallback_text(self.try_generate(state).await)
    }

    pub async fn try_generate(&self, state: &MatchState) -> ApiResult<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        debug!("requesting commentary at minute {}", state.minute);
        let body = GenerateRequest::from_prompt(build_prompt(state));
        let raw = self.post(&url, api_key, &body).await?;
        Ok(raw.text())
    }

    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: &GenerateRequest,
    ) -> ApiResult<GenerateResponse> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<GenerateResponse>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

/// Collapse a generation result into the line to display.
pub fn fallback_text(result: ApiResult<Option<String>>) -> String {
    match result {
        Ok(Some(text)) => text,
        Ok(None) => EMPTY_FALLBACK.to_string(),
        Err(e) => {
            error!("commentary error: {e}");
            ERROR_FALLBACK.to_string()
        }
    }
}

/// The commentator brief sent with every request.
pub fn build_prompt(state: &MatchState) -> String {
    format!(
        "You are a professional football (soccer) commentator.\n\
         Current Match: {} {} - {} {}\n\
         Competition: {}\n\
         Stadium: {}\n\
         Minute: {}'\n\
         Status: {}\n\n\
         Write a single, exciting one-sentence \"live\" commentary snippet for the current situation.\n\
         Make it sound like a top-tier BBC or Sky Sports broadcast.",
        state.team1.name,
        state.team1.score,
        state.team2.score,
        state.team2.name,
        state.competition,
        state.stadium,
        state.minute,
        state.status.code(),
    )
}
