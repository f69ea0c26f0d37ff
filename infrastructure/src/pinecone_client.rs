use domain::models::{EmbeddingVector, MatchList, MatchRecord};
use domain::ports::VectorIndex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::types::{Result, StylistError};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::http::read_json;

const SERVICE: &str = "Pinecone";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredMatch>,
}

#[derive(Deserialize)]
struct ScoredMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl QueryResponse {
    /// Validates each match and keeps at most `top_k`, preserving index order.
    pub(crate) fn into_match_list(self, top_k: usize) -> Result<MatchList> {
        self.matches
            .into_iter()
            .take(top_k)
            .map(|m| MatchRecord::from_metadata(&m.id, m.score, m.metadata.as_ref()))
            .collect()
    }
}

/// Handle to one index, resolved from configuration at startup.
#[derive(Clone)]
pub struct PineconeIndex {
    client: Arc<Client>,
    name: String,
    host: String,
    api_key: String,
}

impl PineconeIndex {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(Client::new()),
            name: config.index_name.clone(),
            host: config.index_host.trim_end_matches('/').to_string(),
            api_key: config.pinecone_api_key.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn query(&self, vector: &EmbeddingVector, top_k: usize) -> Result<MatchList> {
        if top_k == 0 {
            return Err(StylistError::Config("top_k must be at least 1".to_string()));
        }
        let url = format!("{}/query", self.host);
        let request = QueryRequest {
            vector: vector.as_slice(),
            top_k,
            include_metadata: true,
        };
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let body: QueryResponse = read_json(SERVICE, response).await?;
        let matches = body.into_match_list(top_k)?;
        debug!(index = %self.name, top_k, returned = matches.len(), "index queried");
        Ok(matches)
    }
}

impl VectorIndex for PineconeIndex {
    async fn search(&self, vector: &EmbeddingVector, top_k: usize) -> Result<MatchList> {
        self.query(vector, top_k).await
    }
}
