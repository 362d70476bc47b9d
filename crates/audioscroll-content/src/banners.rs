use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use audioscroll_store::DocumentStore;
use audioscroll_types::api::{CreateBannerRequest, UpdateBannerRequest};
use audioscroll_types::models::{Banner, Platform, TargetAudience};

use crate::error::ContentError;
use crate::selector::select_active;
use crate::{decode, decode_all, to_doc};

pub const BANNERS_COLLECTION: &str = "banners";

#[derive(Clone)]
pub struct BannerService {
    store: Arc<dyn DocumentStore>,
}

impl BannerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Banners eligible for display, priority-descending. Degrade-to-empty
    /// policy: any store failure (including a collection that has never
    /// been created on a fresh deployment) yields an empty list, never an
    /// error — an empty promotional surface is acceptable, a broken home
    /// screen is not.
    pub async fn list_active(&self, platform: Platform, audience: TargetAudience) -> Vec<Banner> {
        let docs = match self.store.find_active(BANNERS_COLLECTION).await {
            Ok(docs) => docs,
            Err(e) => {
                warn!("banner query failed, serving empty list: {}", e);
                return Vec::new();
            }
        };

        let banners = decode_all("banner", docs);
        select_active(banners, platform, audience, Utc::now())
    }

    /// Point read. Unlike `list_active`, a store failure here propagates:
    /// an operator looking up a specific banner needs to see it.
    pub async fn get(&self, id: &str) -> Result<Option<Banner>, ContentError> {
        match self.store.get(BANNERS_COLLECTION, id).await? {
            Some(doc) => Ok(Some(decode("banner", doc)?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, req: CreateBannerRequest) -> Result<Banner, ContentError> {
        let mut banner = Banner::new(req, Utc::now());
        let id = self
            .store
            .insert(BANNERS_COLLECTION, to_doc(&banner, "banner")?)
            .await?;
        banner.id = id;
        Ok(banner)
    }

    pub async fn update(&self, id: &str, patch: UpdateBannerRequest) -> Result<Banner, ContentError> {
        let doc = self
            .store
            .get(BANNERS_COLLECTION, id)
            .await?
            .ok_or(ContentError::NotFound("Banner"))?;

        let mut banner: Banner = decode("banner", doc)?;
        patch.apply(&mut banner);
        banner.updated_at = Utc::now();

        self.store
            .put(BANNERS_COLLECTION, id, to_doc(&banner, "banner")?)
            .await?;
        Ok(banner)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        self.store.delete(BANNERS_COLLECTION, id).await?;
        Ok(())
    }
}
