//! Core domain types
//!
//! These are built from the wire types in `geode_rs` and are what the
//! components hold. A [`ClusterStatus`] or [`DataPage`] is always replaced as
//! a whole, never patched field by field.

use crate::formatting::format_key;
use crate::indicators::ConnectionState;
use chrono::{DateTime, Utc};
use geode_rs::{ClusterStatusResponse, MemberInfo, RegionInfo, RegionPageResponse};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Last known cluster health
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStatus {
    pub state: ConnectionState,
    pub member_count: u64,
    pub cache_name: Option<String>,
    pub members: Vec<Member>,
    pub error_message: Option<String>,
    pub note: Option<String>,
    /// When the poll that produced this status completed
    pub observed_at: DateTime<Utc>,
}

impl ClusterStatus {
    pub fn from_response(resp: ClusterStatusResponse) -> Self {
        let state = ConnectionState::from_wire(resp.status.as_deref());
        let error_message = match state {
            ConnectionState::Error => Some(
                resp.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            _ => resp.error,
        };
        let members: Vec<Member> = resp.members.into_iter().map(Member::from).collect();

        Self {
            state,
            member_count: resp.member_count.unwrap_or(members.len() as u64),
            cache_name: resp.cache_name,
            members,
            error_message,
            note: resp.note,
            observed_at: Utc::now(),
        }
    }

    /// Status for a poll that produced no usable answer
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Error,
            member_count: 0,
            cache_name: None,
            members: Vec::new(),
            error_message: Some(message.into()),
            note: None,
            observed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: Option<String>,
    pub host: Option<String>,
    pub groups: Vec<String>,
}

impl From<MemberInfo> for Member {
    fn from(info: MemberInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            host: info.host,
            groups: info.groups,
        }
    }
}

/// One row of the region catalog, keyed by `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSummary {
    pub name: String,
    /// Entry count; the backend may not know it, which reads as 0
    pub size: u64,
    pub full_path: String,
}

impl From<RegionInfo> for RegionSummary {
    fn from(info: RegionInfo) -> Self {
        let full_path = info
            .full_path
            .unwrap_or_else(|| format!("/{}", info.name));
        Self {
            size: info.size.unwrap_or(0),
            name: info.name,
            full_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub value_type: String,
}

/// The `limit`/`offset` pair of a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u32,
}

impl PageWindow {
    pub fn first(limit: u32) -> Self {
        Self { limit, offset: 0 }
    }
}

/// A coherent page of entries from one fetch
#[derive(Debug, Clone, PartialEq)]
pub struct DataPage {
    pub region_name: String,
    pub entries: Vec<Entry>,
    pub total_size: u64,
    pub returned_count: u64,
    pub offset: u32,
    pub limit: u32,
}

impl DataPage {
    pub fn from_response(region: &str, window: PageWindow, resp: RegionPageResponse) -> Self {
        let entries: Vec<Entry> = resp
            .entries
            .into_iter()
            .map(|record| Entry {
                key: format_key(&record.key),
                value: record.value,
                value_type: record.value_type.unwrap_or_else(|| "N/A".to_string()),
            })
            .collect();

        Self {
            region_name: region.to_string(),
            total_size: resp.total_size.unwrap_or(0),
            returned_count: resp.returned_count.unwrap_or(entries.len() as u64),
            entries,
            offset: window.offset,
            limit: window.limit,
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Region shortcuts the backend accepts when creating a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionType {
    #[default]
    Partition,
    PartitionRedundant,
    PartitionPersistent,
    PartitionRedundantPersistent,
    Replicate,
    ReplicatePersistent,
    Local,
}

impl RegionType {
    pub const ALL: [RegionType; 7] = [
        RegionType::Partition,
        RegionType::PartitionRedundant,
        RegionType::PartitionPersistent,
        RegionType::PartitionRedundantPersistent,
        RegionType::Replicate,
        RegionType::ReplicatePersistent,
        RegionType::Local,
    ];

    /// Wire name, as passed in the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Partition => "PARTITION",
            RegionType::PartitionRedundant => "PARTITION_REDUNDANT",
            RegionType::PartitionPersistent => "PARTITION_PERSISTENT",
            RegionType::PartitionRedundantPersistent => "PARTITION_REDUNDANT_PERSISTENT",
            RegionType::Replicate => "REPLICATE",
            RegionType::ReplicatePersistent => "REPLICATE_PERSISTENT",
            RegionType::Local => "LOCAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RegionType::Partition => "Data is spread across servers; each entry lives on one member",
            RegionType::PartitionRedundant => "Partitioned with one redundant copy of every entry",
            RegionType::PartitionPersistent => "Partitioned and written to disk",
            RegionType::PartitionRedundantPersistent => {
                "Partitioned with a redundant copy, written to disk"
            }
            RegionType::Replicate => "Every server holds a full copy of the data",
            RegionType::ReplicatePersistent => "Replicated to every server and written to disk",
            RegionType::Local => "Kept only on the member that creates it",
        }
    }

    /// The next type in [`RegionType::ALL`], wrapping
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown region type '{}'", s))
    }
}

/// A create-region call in flight; dropped once the call completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub region_name: String,
    pub region_type: RegionType,
}
