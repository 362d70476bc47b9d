use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use audioscroll_store::DocumentStore;
use audioscroll_types::api::UpdateConfigRequest;
use audioscroll_types::models::AppConfig;

use crate::error::ContentError;
use crate::{decode, to_doc};

pub const CONFIG_COLLECTION: &str = "app_config";
pub const CONFIG_DOC_ID: &str = "default";

#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn DocumentStore>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the config singleton. Never fails — the client must always
    /// receive a usable theme. Three tiers: the persisted record; a
    /// synthesized default that is best-effort persisted; a pure
    /// in-memory default when the store is unreachable.
    pub async fn get(&self) -> AppConfig {
        match self.store.get(CONFIG_COLLECTION, CONFIG_DOC_ID).await {
            Ok(Some(doc)) => match decode::<AppConfig>("app config", doc) {
                Ok(config) => config,
                Err(e) => {
                    warn!("app config document is malformed, serving defaults: {}", e);
                    AppConfig::default()
                }
            },
            Ok(None) => {
                info!("app config missing, creating default");
                let config = AppConfig::default();
                match to_doc(&config, "app config") {
                    Ok(doc) => {
                        if let Err(e) = self.store.put(CONFIG_COLLECTION, CONFIG_DOC_ID, doc).await
                        {
                            warn!("failed to persist default app config: {}", e);
                        }
                    }
                    Err(e) => warn!("failed to encode default app config: {}", e),
                }
                config
            }
            Err(e) => {
                warn!("store unavailable, serving default app config: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Merge the patch into the stored config. Theme and feature slots
    /// merge key-by-key; `version` increments on every update of an
    /// existing record.
    pub async fn update(&self, patch: UpdateConfigRequest) -> Result<AppConfig, ContentError> {
        let config = match self.store.get(CONFIG_COLLECTION, CONFIG_DOC_ID).await? {
            Some(doc) => {
                let mut config: AppConfig = decode("app config", doc)?;
                patch.apply(&mut config);
                config.version += 1;
                config.updated_at = Utc::now();
                config
            }
            None => {
                let mut config = AppConfig::default();
                patch.apply(&mut config);
                config
            }
        };

        self.store
            .put(CONFIG_COLLECTION, CONFIG_DOC_ID, to_doc(&config, "app config")?)
            .await?;
        Ok(config)
    }
}
