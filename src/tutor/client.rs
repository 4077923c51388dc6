//! Text generation client
//!
//! Agents depend on the [`TextGenerator`] trait only. [`GeminiClient`] is the
//! production implementation over the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Model returned no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// A service turning a system instruction plus one user message into text
pub trait TextGenerator {
    fn generate(&self, system_instruction: &str, content: &str) -> Result<String>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, system_instruction: &str, content: &str) -> Result<String> {
        (**self).generate(system_instruction, content)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, system_instruction: &str, content: &str) -> Result<String> {
        (**self).generate(system_instruction, content)
    }
}

// ===== Gemini wire format =====

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

fn request_body<'a>(system_instruction: &'a str, content: &'a str) -> GenerateRequest<'a> {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: content }],
        }],
    }
}

/// Blocking client for the Gemini API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, api_base: String, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(GenerationError::MissingApiKey)?;
        Self::new(
            api_key,
            config.model.clone(),
            config.api_base.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, system_instruction: &str, content: &str) -> Result<String> {
        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(system_instruction, content))
            .send()?;

        match response.status() {
            StatusCode::OK => {}
            status => {
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message: response.text().unwrap_or_default(),
                });
            }
        }

        let body: GenerateResponse = response.json()?;
        body.text().ok_or(GenerationError::EmptyResponse)
    }
}
