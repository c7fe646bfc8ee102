//! Gemini implementation of the text-generation backend, talking to the
//! Google Generative Language `generateContent` endpoint over HTTP.

use crate::generation::error::GenerationError;
use crate::generation::generator::TextGenerator;
use bon::bon;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Text generator backed by the Gemini API.
///
/// # Examples
///
/// ```no_run
/// use climatrend::GeminiGenerator;
///
/// let generator = GeminiGenerator::builder()
///     .api_key("secret".to_string())
///     .model("gemini-2.0-flash".to_string())
///     .build();
/// ```
pub struct GeminiGenerator {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

#[bon]
impl GeminiGenerator {
    /// Creates a generator for one model.
    ///
    /// * `.api_key(String)`: **Required.** Gemini API key.
    /// * `.model(String)`: Optional. Model identifier, defaults to
    ///   `gemini-2.0-flash`.
    /// * `.endpoint(String)`: Optional. Base URL override, mainly for tests
    ///   against a local stub server.
    #[builder]
    pub fn new(api_key: String, model: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        info!("requesting summary from model {}", self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Request {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("text generation backend returned {status} for model {}", self.model);
            return Err(GenerationError::HttpStatus { url, status });
        }

        let body = response.text().await.map_err(|e| GenerationError::Request {
            url: url.clone(),
            source: e,
        })?;
        parse_generated_text(&body)
    }
}

/// Pulls the first candidate's text out of a `generateContent` response body.
fn parse_generated_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let text = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text);

    match text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(GenerationError::MalformedResponse(
            "response contained no generated text".to_string(),
        )),
    }
}
