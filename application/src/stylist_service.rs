use domain::models::{Query, StylistResponse};
use domain::ports::{ChatModel, EmbeddingProvider, VectorIndex};
use shared::telemetry::Telemetry;
use shared::types::Result;
use tracing::{debug, info};

use crate::composer::ResponseComposer;

/// Runs embed → search → compose for one query.
pub struct StylistService<E, V, C> {
    embedder: E,
    index: V,
    composer: ResponseComposer<C>,
    top_k: usize,
}

impl<E, V, C> StylistService<E, V, C>
where
    E: EmbeddingProvider,
    V: VectorIndex,
    C: ChatModel,
{
    pub fn new(embedder: E, index: V, chat: C, top_k: usize) -> Self {
        Self {
            embedder,
            index,
            composer: ResponseComposer::new(chat),
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub async fn recommend(&self, query: &Query) -> Result<StylistResponse> {
        let telemetry = Telemetry::new();

        let vector = self.embedder.embed(query).await?;
        debug!(dimensions = vector.dimensions(), "query embedded");

        let matches = self.index.search(&vector, self.top_k).await?;
        debug!(requested = self.top_k, returned = matches.len(), "matches retrieved");

        let response = self.composer.compose(&matches, query).await?;
        info!(
            products = matches.len(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "recommendation ready"
        );
        Ok(response)
    }
}
