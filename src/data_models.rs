use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instant parsed from a manifest, whatever form it arrived in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn from_epoch_seconds(secs: i64) -> Option<Timestamp> {
        DateTime::from_timestamp(secs, 0).map(Timestamp)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SiteManifest {
    pub title: String,
    pub description: String,
    pub theme_color: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub logo_path: Option<String>,
    pub icon_ref: Option<String>,
    /// Display order.
    pub items: Vec<ManifestItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ManifestItem {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub updated_at: Option<Timestamp>,
    pub location: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub files: Vec<String>,
}

impl ManifestItem {
    pub fn thumbnail(&self) -> &str {
        first_or_empty(&self.images)
    }

    pub fn supplemental_link(&self) -> &str {
        first_or_empty(&self.videos)
    }

    pub fn content_link(&self) -> &str {
        first_or_empty(&self.files)
    }
}

fn first_or_empty(list: &[String]) -> &str {
    list.first().map(String::as_str).unwrap_or("")
}
