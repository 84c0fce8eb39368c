//! Reshapes a raw `site.json` document into a [`SiteManifest`].
//!
//! The manifest format belongs to the CMS that publishes it and varies between
//! versions, so every field except `items` is optional here. Missing or
//! mistyped values fall back to empty strings, empty lists or `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::data_models::{ManifestItem, SiteManifest, Timestamp};

/// Display format for every date shown to the user (en-US short date, UTC).
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("manifest is missing required field `{0}`")]
    MissingRequiredField(&'static str),
}

pub fn normalize(raw: &Value) -> Result<SiteManifest, NormalizeError> {
    let Some(root) = raw.as_object() else {
        return Err(NormalizeError::MissingRequiredField("items"));
    };
    let Some(items) = root.get("items").and_then(Value::as_array) else {
        return Err(NormalizeError::MissingRequiredField("items"));
    };

    let site = path(raw, &["metadata", "site"]);
    let theme_vars = path(raw, &["metadata", "theme", "variables"]);

    Ok(SiteManifest {
        title: string_field(raw.get("title")),
        description: string_field(raw.get("description")),
        theme_color: optional_string(theme_vars.and_then(|v| v.get("hexCode"))),
        created_at: site.and_then(|s| s.get("created")).and_then(parse_timestamp),
        updated_at: site.and_then(|s| s.get("updated")).and_then(parse_timestamp),
        logo_path: optional_string(site.and_then(|s| s.get("logo"))),
        icon_ref: optional_string(theme_vars.and_then(|v| v.get("icon"))),
        items: items.iter().map(normalize_item).collect(),
    })
}

fn normalize_item(raw: &Value) -> ManifestItem {
    let metadata = raw.get("metadata");
    let media = |key: &str| media_list(metadata.and_then(|m| m.get(key)));

    let slug = optional_string(raw.get("slug"))
        .or_else(|| optional_string(raw.get("id")))
        .unwrap_or_default();

    ManifestItem {
        slug,
        title: string_field(raw.get("title")),
        description: string_field(raw.get("description")),
        updated_at: metadata
            .and_then(|m| m.get("updated"))
            .and_then(parse_timestamp),
        location: link_field(raw.get("location")).unwrap_or_default(),
        images: media("images"),
        videos: media("videos"),
        files: media("files"),
    }
}

/// Accepts epoch seconds (number or all-digit string) or an ISO-8601 date / date-time.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => {
            let secs = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            Timestamp::from_epoch_seconds(secs)
        }
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(Timestamp::from_epoch_seconds);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp(dt.with_timezone(&Utc)));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Timestamp(naive.and_utc()));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Timestamp(naive.and_utc()))
}

/// Empty string when unset.
pub fn format_date(ts: Option<&Timestamp>) -> String {
    ts.map(|t| t.as_datetime().format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |v, key| v.get(key))
}

fn string_field(value: Option<&Value>) -> String {
    optional_string(value).unwrap_or_default()
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Older manifests wrap links as objects (`{"href": ...}`) instead of plain strings.
fn link_field(value: Option<&Value>) -> Option<String> {
    match value? {
        obj @ Value::Object(_) => ["href", "url", "src", "fullUrl"]
            .iter()
            .find_map(|key| optional_string(obj.get(*key))),
        other => optional_string(Some(other)),
    }
}

fn media_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries.iter().filter_map(|e| link_field(Some(e))).collect(),
        Some(single @ (Value::String(_) | Value::Object(_))) => {
            link_field(Some(single)).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

#[test]
fn test_parse_timestamp_forms() {
    use serde_json::json;

    let expected = Timestamp::from_epoch_seconds(1_700_000_000);
    assert_eq!(parse_timestamp(&json!(1_700_000_000)), expected);
    assert_eq!(parse_timestamp(&json!(1_700_000_000.75)), expected);
    assert_eq!(parse_timestamp(&json!("1700000000")), expected);
    assert_eq!(parse_timestamp(&json!("2023-11-14T22:13:20Z")), expected);
    assert_eq!(parse_timestamp(&json!("2023-11-14T23:13:20+01:00")), expected);
    assert_eq!(parse_timestamp(&json!("2023-11-14T22:13:20")), expected);
    assert_eq!(parse_timestamp(&json!("2023-11-14 22:13:20")), expected);

    assert!(parse_timestamp(&json!("2023-11-14")).is_some());
    assert_eq!(parse_timestamp(&json!("")), None);
    assert_eq!(parse_timestamp(&json!("yesterday")), None);
    assert_eq!(parse_timestamp(&json!(null)), None);
    assert_eq!(parse_timestamp(&json!(true)), None);
}
