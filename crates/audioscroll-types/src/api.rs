use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{AppConfig, Banner, Features, Platform, SpotlightAudiobook, TargetAudience, Theme};

/// For update bodies: an absent field leaves the stored value unchanged,
/// an explicit `null` clears it. Plain `Option<Option<T>>` cannot tell
/// those apart, so nullable fields route through this deserializer.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

// -- Listing --

/// Query parameters for the active-content listings. Both default to
/// `all` when omitted.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveQuery {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub target_audience: TargetAudience,
}

// -- Config --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateConfigRequest {
    pub theme: Option<ThemePatch>,
    pub features: Option<FeaturesPatch>,
}

impl UpdateConfigRequest {
    /// Merge into an existing config slot-by-slot; untouched slots keep
    /// their stored values.
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(theme) = self.theme {
            theme.apply(&mut config.theme);
        }
        if let Some(features) = self.features {
            features.apply(&mut config.features);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemePatch {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub highlight_color: Option<String>,
    pub surface_color: Option<String>,
    pub background_color: Option<String>,
    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub text_tertiary: Option<String>,
}

impl ThemePatch {
    pub fn apply(self, theme: &mut Theme) {
        if let Some(v) = self.primary_color {
            theme.primary_color = v;
        }
        if let Some(v) = self.secondary_color {
            theme.secondary_color = v;
        }
        if let Some(v) = self.accent_color {
            theme.accent_color = v;
        }
        if let Some(v) = self.highlight_color {
            theme.highlight_color = v;
        }
        if let Some(v) = self.surface_color {
            theme.surface_color = v;
        }
        if let Some(v) = self.background_color {
            theme.background_color = v;
        }
        if let Some(v) = self.text_primary {
            theme.text_primary = v;
        }
        if let Some(v) = self.text_secondary {
            theme.text_secondary = v;
        }
        if let Some(v) = self.text_tertiary {
            theme.text_tertiary = v;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturesPatch {
    pub enable_banners: Option<bool>,
    pub enable_spotlight: Option<bool>,
    pub enable_onboarding: Option<bool>,
    pub max_snippet_duration: Option<i64>,
    pub min_snippet_duration: Option<i64>,
}

impl FeaturesPatch {
    pub fn apply(self, features: &mut Features) {
        if let Some(v) = self.enable_banners {
            features.enable_banners = v;
        }
        if let Some(v) = self.enable_spotlight {
            features.enable_spotlight = v;
        }
        if let Some(v) = self.enable_onboarding {
            features.enable_onboarding = v;
        }
        if let Some(v) = self.max_snippet_duration {
            features.max_snippet_duration = v;
        }
        if let Some(v) = self.min_snippet_duration {
            features.min_snippet_duration = v;
        }
    }
}

// -- Banners --

/// All fields optional at the serde level: required-ness and value checks
/// are reported as field-level validation errors, not deserialize errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBannerRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub target_audience: Option<TargetAudience>,
    pub platform: Option<Platform>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBannerRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub target_audience: Option<TargetAudience>,
    pub platform: Option<Platform>,
}

impl UpdateBannerRequest {
    /// Shallow merge of the provided fields into the stored record.
    pub fn apply(self, banner: &mut Banner) {
        if let Some(v) = self.title {
            banner.title = v;
        }
        if let Some(v) = self.subtitle {
            banner.subtitle = v;
        }
        if let Some(v) = self.image_url {
            banner.image_url = v;
        }
        if let Some(v) = self.action_url {
            banner.action_url = v;
        }
        if let Some(v) = self.action_text {
            banner.action_text = v;
        }
        if let Some(v) = self.priority {
            banner.priority = v;
        }
        if let Some(v) = self.is_active {
            banner.is_active = v;
        }
        if let Some(v) = self.start_date {
            banner.start_date = v;
        }
        if let Some(v) = self.end_date {
            banner.end_date = v;
        }
        if let Some(v) = self.target_audience {
            banner.target_audience = v;
        }
        if let Some(v) = self.platform {
            banner.platform = v;
        }
    }
}

// -- Spotlight --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSpotlightRequest {
    pub audiobook_snippet_id: Option<String>,
    pub title: Option<String>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub promotion_text: Option<String>,
    pub badge: Option<String>,
    pub target_audience: Option<TargetAudience>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSpotlightRequest {
    pub audiobook_snippet_id: Option<String>,
    pub title: Option<String>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub promotion_text: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub badge: Option<Option<String>>,
    pub target_audience: Option<TargetAudience>,
}

impl UpdateSpotlightRequest {
    pub fn apply(self, spotlight: &mut SpotlightAudiobook) {
        if let Some(v) = self.audiobook_snippet_id {
            spotlight.audiobook_snippet_id = v;
        }
        if let Some(v) = self.title {
            spotlight.title = v;
        }
        if let Some(v) = self.priority {
            spotlight.priority = v;
        }
        if let Some(v) = self.is_active {
            spotlight.is_active = v;
        }
        if let Some(v) = self.start_date {
            spotlight.start_date = v;
        }
        if let Some(v) = self.end_date {
            spotlight.end_date = v;
        }
        if let Some(v) = self.promotion_text {
            spotlight.promotion_text = v;
        }
        if let Some(v) = self.badge {
            spotlight.badge = v;
        }
        if let Some(v) = self.target_audience {
            spotlight.target_audience = v;
        }
    }
}

/// A spotlight as served to clients: the stored record plus the resolved
/// snippet document. Listings always carry the snippet; a point read may
/// omit it when the reference no longer resolves.
#[derive(Debug, Clone, Serialize)]
pub struct SpotlightResponse {
    #[serde(flatten)]
    pub spotlight: SpotlightAudiobook,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_patch_touches_only_provided_slots() {
        let mut theme = Theme::default();
        let patch: ThemePatch =
            serde_json::from_value(serde_json::json!({ "primaryColor": "#FF0000" })).unwrap();
        patch.apply(&mut theme);

        assert_eq!(theme.primary_color, "#FF0000");
        assert_eq!(theme.secondary_color, Theme::default().secondary_color);
        assert_eq!(theme.text_tertiary, Theme::default().text_tertiary);
    }

    #[test]
    fn update_distinguishes_absent_from_null_end_date() {
        let absent: UpdateBannerRequest = serde_json::from_value(serde_json::json!({
            "title": "updated",
        }))
        .unwrap();
        assert!(absent.end_date.is_none());

        let cleared: UpdateBannerRequest = serde_json::from_value(serde_json::json!({
            "endDate": null,
        }))
        .unwrap();
        assert_eq!(cleared.end_date, Some(None));

        let set: UpdateBannerRequest = serde_json::from_value(serde_json::json!({
            "endDate": "2030-01-01T00:00:00Z",
        }))
        .unwrap();
        assert!(matches!(set.end_date, Some(Some(_))));
    }

    #[test]
    fn unknown_body_fields_are_rejected() {
        let result: Result<UpdateConfigRequest, _> =
            serde_json::from_value(serde_json::json!({ "banner": {} }));
        assert!(result.is_err());
    }
}
