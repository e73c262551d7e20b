//! geode-rs: Rust client for the Geode data-browser HTTP API
//!
//! This crate provides a typed client for the REST API a data-browser
//! instance exposes in front of an Apache Geode cluster: cluster status,
//! region listing, paged region contents and region provisioning.
//!
//! # Example
//!
//! ```no_run
//! use geode_rs::{Context, GeodeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::from_endpoint("localhost:8080");
//!     let client = GeodeClient::connect(&ctx.api_root(), ctx.timeout())?;
//!
//!     for region in client.regions().await? {
//!         println!("{}: {:?}", region.name, region.size);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod transport;
pub mod types;

pub use client::GeodeClient;
pub use config::{Context, GeodeConfig};
pub use error::{ConfigError, TransportError};
pub use transport::{ApiPath, HttpTransport, Method, Query, Transport};
pub use types::{
    ClusterStatusResponse, EntryRecord, MemberInfo, MutationResponse, RegionInfo,
    RegionPageResponse,
};
