//! Seams to the three external services.

use std::future::Future;

use shared::types::Result;

use crate::message::ChatMessage;
use crate::models::{EmbeddingVector, MatchList, Query};

/// Turns query text into a vector.
pub trait EmbeddingProvider {
    fn embed(&self, query: &Query) -> impl Future<Output = Result<EmbeddingVector>> + Send;
}

/// Nearest-neighbour lookup against an external index.
///
/// Implementations return at most `top_k` records, in index order.
pub trait VectorIndex {
    fn search(
        &self,
        vector: &EmbeddingVector,
        top_k: usize,
    ) -> impl Future<Output = Result<MatchList>> + Send;
}

/// Chat-completion model. Returns the first choice's text.
pub trait ChatModel {
    fn complete(&self, messages: &[ChatMessage]) -> impl Future<Output = Result<String>> + Send;
}
