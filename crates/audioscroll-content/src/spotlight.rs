use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::warn;

use audioscroll_store::DocumentStore;
use audioscroll_types::api::{CreateSpotlightRequest, SpotlightResponse, UpdateSpotlightRequest};
use audioscroll_types::models::{Platform, SpotlightAudiobook, TargetAudience};

use crate::error::ContentError;
use crate::selector::select_active;
use crate::{decode, decode_all, to_doc};

pub const SPOTLIGHT_COLLECTION: &str = "spotlight_audiobooks";
pub const SNIPPETS_COLLECTION: &str = "audiobook_snippets";

#[derive(Clone)]
pub struct SpotlightService {
    store: Arc<dyn DocumentStore>,
}

impl SpotlightService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Spotlights eligible for display with their snippet attached.
    /// Same degrade-to-empty policy as banners. Snippet lookups fan out
    /// concurrently; an item whose snippet fails to resolve is dropped on
    /// its own — a spotlight without content is not displayable, and one
    /// bad reference must not take down the batch.
    pub async fn list_active(
        &self,
        platform: Platform,
        audience: TargetAudience,
    ) -> Vec<SpotlightResponse> {
        let docs = match self.store.find_active(SPOTLIGHT_COLLECTION).await {
            Ok(docs) => docs,
            Err(e) => {
                warn!("spotlight query failed, serving empty list: {}", e);
                return Vec::new();
            }
        };

        let spotlights: Vec<SpotlightAudiobook> = decode_all("spotlight", docs);
        let eligible = select_active(spotlights, platform, audience, Utc::now());

        let lookups = eligible
            .iter()
            .map(|s| self.store.get(SNIPPETS_COLLECTION, &s.audiobook_snippet_id));
        let snippets = join_all(lookups).await;

        eligible
            .into_iter()
            .zip(snippets)
            .filter_map(|(spotlight, snippet)| match snippet {
                Ok(Some(snippet)) => Some(SpotlightResponse {
                    spotlight,
                    snippet: Some(snippet),
                }),
                Ok(None) => {
                    warn!(
                        "dropping spotlight '{}': snippet '{}' does not exist",
                        spotlight.id, spotlight.audiobook_snippet_id
                    );
                    None
                }
                Err(e) => {
                    warn!(
                        "dropping spotlight '{}': snippet lookup failed: {}",
                        spotlight.id, e
                    );
                    None
                }
            })
            .collect()
    }

    /// Point read, with the snippet attached when it still resolves. A
    /// dangling reference does not turn a successful read into an error.
    pub async fn get(&self, id: &str) -> Result<Option<SpotlightResponse>, ContentError> {
        let Some(doc) = self.store.get(SPOTLIGHT_COLLECTION, id).await? else {
            return Ok(None);
        };

        let spotlight: SpotlightAudiobook = decode("spotlight", doc)?;
        let snippet = self
            .store
            .get(SNIPPETS_COLLECTION, &spotlight.audiobook_snippet_id)
            .await?;
        Ok(Some(SpotlightResponse { spotlight, snippet }))
    }

    /// Referential integrity first: the snippet must exist before
    /// anything is persisted.
    pub async fn create(
        &self,
        req: CreateSpotlightRequest,
    ) -> Result<SpotlightAudiobook, ContentError> {
        let snippet_id = req.audiobook_snippet_id.clone().unwrap_or_default();
        if self
            .store
            .get(SNIPPETS_COLLECTION, &snippet_id)
            .await?
            .is_none()
        {
            return Err(ContentError::SnippetNotFound);
        }

        let mut spotlight = SpotlightAudiobook::new(req, Utc::now());
        let id = self
            .store
            .insert(SPOTLIGHT_COLLECTION, to_doc(&spotlight, "spotlight")?)
            .await?;
        spotlight.id = id;
        Ok(spotlight)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: UpdateSpotlightRequest,
    ) -> Result<SpotlightAudiobook, ContentError> {
        let doc = self
            .store
            .get(SPOTLIGHT_COLLECTION, id)
            .await?
            .ok_or(ContentError::NotFound("Spotlight"))?;

        let mut spotlight: SpotlightAudiobook = decode("spotlight", doc)?;
        patch.apply(&mut spotlight);
        spotlight.updated_at = Utc::now();

        self.store
            .put(SPOTLIGHT_COLLECTION, id, to_doc(&spotlight, "spotlight")?)
            .await?;
        Ok(spotlight)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        self.store.delete(SPOTLIGHT_COLLECTION, id).await?;
        Ok(())
    }
}
