use domain::message::ChatMessage;
use domain::models::{EmbeddingVector, Query};
use domain::ports::{ChatModel, EmbeddingProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::{Result, StylistError};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::http::read_json;

const SERVICE: &str = "OpenAI";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    /// The first vector, untouched.
    pub(crate) fn into_first_vector(self) -> Result<EmbeddingVector> {
        self.data
            .into_iter()
            .next()
            .map(|d| EmbeddingVector::new(d.embedding))
            .ok_or_else(|| StylistError::InvalidResponse {
                service: SERVICE,
                reason: "embedding response contained no vectors".to_string(),
            })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// The first choice's content, verbatim.
    pub(crate) fn into_first_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| StylistError::InvalidResponse {
                service: SERVICE,
                reason: "chat completion contained no choices".to_string(),
            })
    }
}

/// Client for the OpenAI embedding and chat-completion endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            embedding_model: config.embedding_model.clone(),
            chat_model: config.chat_model.clone(),
        }
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<EmbeddingVector> {
        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: text,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let body: EmbeddingResponse = read_json(SERVICE, response).await?;
        let vector = body.into_first_vector()?;
        debug!(model = %self.embedding_model, dimensions = vector.dimensions(), "embedding generated");
        Ok(vector)
    }

    pub async fn generate_response(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.chat_model,
            messages,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let body: ChatResponse = read_json(SERVICE, response).await?;
        let content = body.into_first_content()?;
        debug!(model = %self.chat_model, chars = content.len(), "chat completion received");
        Ok(content)
    }
}

impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, query: &Query) -> Result<EmbeddingVector> {
        self.generate_embedding(query.as_str()).await
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.generate_response(messages).await
    }
}
