use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use audioscroll_api::state::AppStateInner;
use audioscroll_store::{DocumentStore, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audioscroll=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("AUDIOSCROLL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("AUDIOSCROLL_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let mongo_uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let mongo_db = std::env::var("MONGODB_DB").unwrap_or_else(|_| "audioscroll".into());

    // Store. An unreachable MongoDB is not fatal: config falls back to
    // defaults and the listings degrade to empty until it recovers.
    let store = MongoStore::connect(&mongo_uri, &mongo_db).await?;
    if let Err(e) = store.ping().await {
        warn!("MongoDB unreachable at startup, serving fallbacks until it recovers: {}", e);
    }
    let store: Arc<dyn DocumentStore> = Arc::new(store);

    // Shared state
    let state = AppStateInner::new(store);

    let cors = match std::env::var("CORS_ORIGIN") {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::permissive(),
    };

    let app = audioscroll_api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("AudioScroll backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
