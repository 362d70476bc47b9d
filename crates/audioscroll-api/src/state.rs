use std::sync::Arc;

use audioscroll_content::{BannerService, ConfigService, SpotlightService};
use audioscroll_store::DocumentStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub config: ConfigService,
    pub banners: BannerService,
    pub spotlight: SpotlightService,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn DocumentStore>) -> AppState {
        Arc::new(Self {
            config: ConfigService::new(store.clone()),
            banners: BannerService::new(store.clone()),
            spotlight: SpotlightService::new(store),
        })
    }
}
