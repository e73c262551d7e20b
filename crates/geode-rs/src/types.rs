//! Wire types returned by the data-browser API
//!
//! The backend builds its responses from loosely typed maps, so most fields
//! are optional and numeric counts are decoded leniently (`"N/A"` becomes
//! `None`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `GET /cluster/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatusResponse {
    /// `connected`, `disconnected`, `error`, ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub cache_name: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
    #[serde(default)]
    pub error: Option<String>,
    /// Free-form remark, e.g. about limited member visibility
    #[serde(default)]
    pub note: Option<String>,
}

/// One cluster member as reported by the status endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemberInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub groups: Vec<String>,
}

/// One element of `GET /regions/info`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub size: Option<u64>,
    #[serde(default)]
    pub full_path: Option<String>,
}

/// `GET /data/{name}?limit=&offset=`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entries: Vec<EntryRecord>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub returned_count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One key/value pair of a region page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    /// Keys are usually strings but may be any JSON value
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub value_type: Option<String>,
}

/// `POST /regions/{name}` and `DELETE /regions/{name}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Set when the region was created but the client-side proxy lagged
    #[serde(default)]
    pub proxy_warning: Option<String>,
    #[serde(default)]
    pub region_type: Option<String>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
