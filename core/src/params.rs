//! Parameter enricher: merges application metadata into outgoing form fields.
//!
//! # Design
//! The enricher takes the caller's field map by value and returns an owned
//! map, so a caller-held map is never mutated through a shared handle. When
//! no metadata is configured the input passes through untouched (`None`
//! stays `None`), which also makes the enricher idempotent in that case.
//! When metadata is configured, each present field is written
//! unconditionally (configuration wins over a caller-supplied field of the
//! same name), while fields with other names are never touched.

use std::collections::HashMap;

use crate::types::AppMetadata;

/// Merge configured application metadata into an outgoing field map.
///
/// Lazily allocates a map when the input is `None` and metadata is
/// configured; adds `app_name`, `app_version`, and `app_uuid` for each
/// non-empty metadata field.
pub fn enrich_params(
    metadata: Option<&AppMetadata>,
    params: Option<HashMap<String, String>>,
) -> Option<HashMap<String, String>> {
    let Some(metadata) = metadata else {
        return params;
    };

    let mut params = params.unwrap_or_default();
    if let Some(name) = metadata.name.as_deref().filter(|name| !name.is_empty()) {
        params.insert("app_name".to_string(), name.to_string());
    }
    if let Some(version) = metadata
        .version
        .as_deref()
        .filter(|version| !version.is_empty())
    {
        params.insert("app_version".to_string(), version.to_string());
    }
    if let Some(uuid) = metadata.instance_uuid {
        params.insert("app_uuid".to_string(), uuid.to_string());
    }
    Some(params)
}
