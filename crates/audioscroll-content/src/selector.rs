//! Eligibility rules the store query cannot express: cross-field audience
//! and platform matching plus the date-window check, applied in memory to
//! records the store already filtered on `isActive` and ordered by
//! priority.

use chrono::{DateTime, Utc};

use audioscroll_types::models::{Banner, Platform, SpotlightAudiobook, TargetAudience};

/// A record that can be promoted to clients for a bounded window.
pub trait Promotable {
    fn is_active(&self) -> bool;
    fn start_date(&self) -> DateTime<Utc>;
    fn end_date(&self) -> Option<DateTime<Utc>>;
    fn target_audience(&self) -> TargetAudience;

    /// Entities without a platform restriction match every platform.
    fn platform(&self) -> Platform {
        Platform::All
    }

    /// The date-window invariant, evaluated against a caller-supplied
    /// "now". This re-checks the active flag even though the store
    /// already filtered on it: the store-side filter can be coarser or
    /// stale, and it cannot evaluate date ranges against the clock.
    fn currently_active(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        if now < self.start_date() {
            return false;
        }
        if let Some(end) = self.end_date() {
            if now > end {
                return false;
            }
        }
        true
    }
}

impl Promotable for Banner {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    fn target_audience(&self) -> TargetAudience {
        self.target_audience
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

impl Promotable for SpotlightAudiobook {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    fn target_audience(&self) -> TargetAudience {
        self.target_audience
    }
}

/// Keep the records eligible for display right now, preserving the
/// store's priority order. A record targeted at a specific platform or
/// audience is shown only to requests for that exact segment; `all` on
/// the record side matches any request. Never fails — no matches is an
/// ordinary outcome.
pub fn select_active<T: Promotable>(
    records: Vec<T>,
    platform: Platform,
    audience: TargetAudience,
    now: DateTime<Utc>,
) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| record.platform() == Platform::All || record.platform() == platform)
        .filter(|record| {
            record.target_audience() == TargetAudience::All
                || record.target_audience() == audience
        })
        .filter(|record| record.currently_active(now))
        .collect()
}
