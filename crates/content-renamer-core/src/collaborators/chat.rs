//! Description through an OpenAI-compatible chat-completions service.
//!
//! One client serves both capabilities: documents are named from their text,
//! images are captioned from a base64 data URL.

use base64::Engine;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::{CollaboratorError, ImageDescriber, TextDescriber};
use crate::config::Config;

const NAMING_PROMPT: &str = "You are an expert in generating file names based on the content provided. Given the content of a text or image file, suggest a concise and descriptive file name that is no longer than 20 characters. Ensure the name captures the essence of the content without including any personal or sensitive information. Do not include the file extension; provide only the file name.";

const CAPTION_PROMPT: &str = "Write one short caption describing this image.";

/// Longest generated file name, in tokens
const TEXT_MAX_TOKENS: u32 = 20;

/// Longest generated caption, in tokens
const CAPTION_MAX_TOKENS: u32 = 64;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the description service
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub api_key: Option<String>,
    pub device: String,
}

impl ChatSettings {
    /// Build settings from the run configuration, reading the API key from
    /// the configured environment variable if there is one
    pub fn from_config(config: &Config) -> Self {
        let api_key = config
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            api_key,
            device: config.device.clone(),
        }
    }
}

/// Chat-completions client implementing both description capabilities
#[derive(Debug, Clone)]
pub struct ChatDescriber {
    client: Client,
    settings: ChatSettings,
}

impl ChatDescriber {
    pub fn new(settings: ChatSettings) -> Result<Self, CollaboratorError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        info!(
            "Description service at {} (text: {}, image: {}, device: {})",
            settings.endpoint, settings.text_model, settings.image_model, settings.device
        );

        Ok(Self { client, settings })
    }

    fn complete(&self, request: &ChatRequest) -> Result<String, CollaboratorError> {
        let url = format!("{}/chat/completions", self.settings.endpoint);
        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.settings.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: ChatResponse = builder.send()?.error_for_status()?.json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(CollaboratorError::EmptyResponse);
        }

        debug!("{} answered {:?}", request.model, content);
        Ok(content)
    }
}

impl TextDescriber for ChatDescriber {
    fn describe_text(&self, text: &str) -> Result<String, CollaboratorError> {
        let request = ChatRequest {
            model: self.settings.text_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(NAMING_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Text(text.to_string()),
                },
            ],
            max_tokens: TEXT_MAX_TOKENS,
            temperature: 0.7,
        };

        self.complete(&request)
    }
}

impl ImageDescriber for ChatDescriber {
    fn describe_image(&self, path: &Path) -> Result<String, CollaboratorError> {
        let bytes = std::fs::read(path)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let data_url = format!("data:{};base64,{}", image_mime(path), encoded);

        let request = ChatRequest {
            model: self.settings.image_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: CAPTION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            }],
            max_tokens: CAPTION_MAX_TOKENS,
            temperature: 0.0,
        };

        self.complete(&request)
    }
}

/// MIME type for the data URL, from the file extension
fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}

// -- Wire types --

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
