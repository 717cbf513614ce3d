use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::language::Language;

/// Fixed text substituted when the service responds without usable output.
pub const TRANSLATION_FAILED: &str = "Translation failed.";

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Content {
    fn from_text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }

    fn joined_text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// A completed translation result.
///
/// `placeholder` is set when the service was reachable but returned nothing
/// usable and [`TRANSLATION_FAILED`] was substituted. The displayed text is
/// the same either way; the flag exists so callers and tests can tell the
/// two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub placeholder: bool,
}

impl Translation {
    fn empty() -> Self {
        Self {
            text: String::new(),
            placeholder: false,
        }
    }

    fn of(text: String) -> Self {
        Self {
            text,
            placeholder: false,
        }
    }

    fn failed() -> Self {
        Self {
            text: TRANSLATION_FAILED.to_string(),
            placeholder: true,
        }
    }
}

/// Errors where the transport itself failed: the network was unreachable or
/// the service rejected the request outright. An empty or malformed payload
/// on a successful response is deliberately *not* an error; it becomes the
/// placeholder translation instead.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("failed to reach translation service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("translation service error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// The seam the input controller depends on, so tests can substitute a
/// scripted translator for the live client.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: Language,
    ) -> Result<Translation, TranslateError>;
}

/// Build the system instruction pinning output to literal Odia
fn build_translation_system_instruction() -> String {
    [
        "You are an expert English-Hindi-Odia translator.",
        "Your task: Translate the input text to fluent, natural Odia.",
        "- If source is \"Auto-Detect\", identify if it's English or Hindi.",
        "- Return ONLY the translated Odia text.",
        "- Do not add notes, explanations, or quotes.",
    ]
    .join("\n")
}

/// Build the user prompt carrying the hint and the literal text
fn build_translation_prompt(text: &str, source: Language) -> String {
    format!(
        "Source Language setting: {}. Target: Odia. Text to translate: \"{}\"",
        source.name(),
        text
    )
}

/// Build the narrower classification prompt
fn build_detection_prompt(text: &str) -> String {
    format!(
        "Return only the word \"Hindi\" or \"English\" for this text: \"{}\"",
        text
    )
}

/// Stateless client for the Gemini generative-text service.
///
/// Each call is an independent request; the client holds no session state
/// beyond the pooled HTTP connections inside `reqwest::Client`.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one generateContent request and return the concatenated text of
    /// the first candidate, or `None` when the payload carried no usable
    /// text (including a body that failed to parse).
    async fn generate(&self, request: &GenerateContentRequest) -> Result<Option<String>, TranslateError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Unparseable response from translation service: {e}");
                return Ok(None);
            }
        };

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(Content::joined_text)
            .filter(|t| !t.is_empty());
        Ok(text)
    }

    /// Translate `text` to Odia.
    ///
    /// Empty or whitespace-only input short-circuits to an empty result
    /// without contacting the service. A reachable service that returns no
    /// usable text yields the fixed placeholder; only transport-level
    /// failures surface as errors.
    pub async fn translate(
        &self,
        text: &str,
        source: Language,
    ) -> Result<Translation, TranslateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Translation::empty());
        }

        let request = GenerateContentRequest {
            contents: vec![Content::from_text(build_translation_prompt(trimmed, source))],
            system_instruction: Some(Content::from_text(build_translation_system_instruction())),
            // Near-zero temperature for consistent literal phrasing
            generation_config: GenerationConfig { temperature: 0.1 },
        };

        debug!(hint = %source, chars = trimmed.chars().count(), "Requesting translation");
        match self.generate(&request).await? {
            Some(text) => Ok(Translation::of(text)),
            None => Ok(Translation::failed()),
        }
    }

    /// Classify `text` as English or Hindi.
    ///
    /// Defaults to English on any transport failure; empty input returns
    /// Auto-Detect without a request. Not used by the main translate flow.
    pub async fn detect_language(&self, text: &str) -> Language {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Language::AutoDetect;
        }

        let request = GenerateContentRequest {
            contents: vec![Content::from_text(build_detection_prompt(trimmed))],
            system_instruction: None,
            generation_config: GenerationConfig { temperature: 0.1 },
        };

        match self.generate(&request).await {
            Ok(Some(answer)) if answer.to_lowercase().contains("hindi") => Language::Hindi,
            Ok(_) => Language::English,
            Err(e) => {
                warn!("Language detection failed, assuming English: {e}");
                Language::English
            }
        }
    }
}

#[async_trait]
impl Translator for GeminiClient {
    async fn translate(
        &self,
        text: &str,
        source: Language,
    ) -> Result<Translation, TranslateError> {
        GeminiClient::translate(self, text, source).await
    }
}
