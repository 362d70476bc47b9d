pub mod banners;
pub mod config;
pub mod error;
pub mod selector;
pub mod spotlight;

pub use banners::BannerService;
pub use config::ConfigService;
pub use error::ContentError;
pub use spotlight::SpotlightService;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub(crate) fn to_doc<T: Serialize>(entity: &T, what: &'static str) -> Result<Value, ContentError> {
    serde_json::to_value(entity).map_err(|e| ContentError::Decode(what, e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(what: &'static str, doc: Value) -> Result<T, ContentError> {
    serde_json::from_value(doc).map_err(|e| ContentError::Decode(what, e.to_string()))
}

/// Decode a query result set, skipping (and logging) documents that do
/// not parse. One malformed record must not empty the whole listing.
pub(crate) fn decode_all<T: DeserializeOwned>(what: &'static str, docs: Vec<Value>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.get("id").and_then(Value::as_str).unwrap_or("?").to_string();
            match serde_json::from_value(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("skipping malformed {} document '{}': {}", what, id, e);
                    None
                }
            }
        })
        .collect()
}
