use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CreateBannerRequest, CreateSpotlightRequest};

/// Audience segment a promotion is aimed at. `All` means untargeted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    #[default]
    All,
    NewUsers,
    Premium,
}

/// Client platform a banner is restricted to. `All` means unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    All,
    Ios,
    Android,
}

// -- App config --

/// Singleton app configuration: theme colors and feature switches the
/// client reads at startup so they can change without an app release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_config_id")]
    pub id: String,
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub features: Features,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_config_id() -> String {
    "default".to_string()
}

fn default_version() -> i64 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: default_config_id(),
            version: default_version(),
            theme: Theme::default(),
            features: Features::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Named color slots. Every slot has a hard-coded default so a partially
/// populated document still yields a complete theme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_surface_color")]
    pub surface_color: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_text_primary")]
    pub text_primary: String,
    #[serde(default = "default_text_secondary")]
    pub text_secondary: String,
    #[serde(default = "default_text_tertiary")]
    pub text_tertiary: String,
}

fn default_primary_color() -> String {
    "#1A1A2E".to_string()
}

fn default_secondary_color() -> String {
    "#16213E".to_string()
}

fn default_accent_color() -> String {
    "#0F3460".to_string()
}

fn default_highlight_color() -> String {
    "#E94560".to_string()
}

fn default_surface_color() -> String {
    "#0F0F1E".to_string()
}

fn default_background_color() -> String {
    "#000000".to_string()
}

fn default_text_primary() -> String {
    "#FFFFFF".to_string()
}

fn default_text_secondary() -> String {
    "#B0B0B0".to_string()
}

fn default_text_tertiary() -> String {
    "#808080".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            accent_color: default_accent_color(),
            highlight_color: default_highlight_color(),
            surface_color: default_surface_color(),
            background_color: default_background_color(),
            text_primary: default_text_primary(),
            text_secondary: default_text_secondary(),
            text_tertiary: default_text_tertiary(),
        }
    }
}

/// Feature switches and tuning values read by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default = "default_true")]
    pub enable_banners: bool,
    #[serde(default = "default_true")]
    pub enable_spotlight: bool,
    #[serde(default = "default_true")]
    pub enable_onboarding: bool,
    #[serde(default = "default_max_snippet_duration")]
    pub max_snippet_duration: i64,
    #[serde(default = "default_min_snippet_duration")]
    pub min_snippet_duration: i64,
}

fn default_true() -> bool {
    true
}

fn default_max_snippet_duration() -> i64 {
    90
}

fn default_min_snippet_duration() -> i64 {
    30
}

impl Default for Features {
    fn default() -> Self {
        Self {
            enable_banners: true,
            enable_spotlight: true,
            enable_onboarding: true,
            max_snippet_duration: default_max_snippet_duration(),
            min_snippet_duration: default_min_snippet_duration(),
        }
    }
}

// -- Banner --

/// Promotional banner shown in the client's home feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub action_url: String,
    #[serde(default = "default_action_text")]
    pub action_text: String,
    /// Higher priority sorts first.
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_action_text() -> String {
    "Learn More".to_string()
}

impl Banner {
    /// Build a banner from a create request, filling every omitted field
    /// from the default table. The id is assigned by the store on insert.
    pub fn new(req: CreateBannerRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            title: req.title.unwrap_or_default(),
            subtitle: req.subtitle.unwrap_or_default(),
            image_url: req.image_url.unwrap_or_default(),
            action_url: req.action_url.unwrap_or_default(),
            action_text: req.action_text.unwrap_or_else(default_action_text),
            priority: req.priority.unwrap_or(0),
            is_active: req.is_active.unwrap_or(true),
            start_date: req.start_date.unwrap_or(now),
            end_date: req.end_date,
            target_audience: req.target_audience.unwrap_or_default(),
            platform: req.platform.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

// -- Spotlight --

/// A featured audiobook promotion. References a snippet record owned by
/// the content pipeline; the snippet is resolved at read time and never
/// copied into this document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightAudiobook {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub audiobook_snippet_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "Utc::now")]
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub promotion_text: String,
    /// e.g. "New Release", "Editor's Pick".
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub target_audience: TargetAudience,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl SpotlightAudiobook {
    pub fn new(req: CreateSpotlightRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            audiobook_snippet_id: req.audiobook_snippet_id.unwrap_or_default(),
            title: req.title.unwrap_or_default(),
            priority: req.priority.unwrap_or(0),
            is_active: req.is_active.unwrap_or(true),
            start_date: req.start_date.unwrap_or(now),
            end_date: req.end_date,
            promotion_text: req.promotion_text.unwrap_or_default(),
            badge: req.badge,
            target_audience: req.target_audience.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_from_minimal_request_uses_default_table() {
        let now = Utc::now();
        let req: CreateBannerRequest = serde_json::from_value(serde_json::json!({
            "title": "Sale",
            "imageUrl": "https://cdn.example.com/sale.png",
        }))
        .unwrap();

        let banner = Banner::new(req, now);
        assert_eq!(banner.title, "Sale");
        assert_eq!(banner.action_text, "Learn More");
        assert_eq!(banner.priority, 0);
        assert!(banner.is_active);
        assert_eq!(banner.start_date, now);
        assert_eq!(banner.end_date, None);
        assert_eq!(banner.target_audience, TargetAudience::All);
        assert_eq!(banner.platform, Platform::All);
    }

    #[test]
    fn partial_config_document_fills_missing_slots() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "id": "default",
            "version": 3,
            "theme": { "primaryColor": "#123456" },
            "features": { "enableBanners": false },
        }))
        .unwrap();

        assert_eq!(config.version, 3);
        assert_eq!(config.theme.primary_color, "#123456");
        assert_eq!(config.theme.background_color, "#000000");
        assert!(!config.features.enable_banners);
        assert!(config.features.enable_spotlight);
        assert_eq!(config.features.max_snippet_duration, 90);
    }

    #[test]
    fn audience_and_platform_use_wire_names() {
        assert_eq!(
            serde_json::to_value(TargetAudience::NewUsers).unwrap(),
            serde_json::json!("new_users")
        );
        assert_eq!(
            serde_json::to_value(Platform::Ios).unwrap(),
            serde_json::json!("ios")
        );
    }
}
