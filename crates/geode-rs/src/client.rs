//! High-level data-browser API client
//!
//! Wraps a [`Transport`] and decodes each endpoint into its wire type.

use crate::error::TransportError;
use crate::transport::{ApiPath, HttpTransport, Method, Transport};
use crate::types::{ClusterStatusResponse, MutationResponse, RegionInfo, RegionPageResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Typed client for the data-browser API
///
/// Cheap to clone; clones share the same transport.
#[derive(Debug)]
pub struct GeodeClient<T = HttpTransport> {
    transport: Arc<T>,
}

impl<T> Clone for GeodeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl GeodeClient<HttpTransport> {
    /// Create an HTTP client for the given API root
    pub fn connect(api_root: &str, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(api_root, timeout)?))
    }
}

impl<T: Transport> GeodeClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        path: ApiPath,
        query: &[(&str, String)],
    ) -> Result<R, TransportError> {
        let value: Value = self.transport.request(method, &path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Current cluster connectivity and membership
    pub async fn cluster_status(&self) -> Result<ClusterStatusResponse, TransportError> {
        self.fetch(Method::Get, ApiPath::new("cluster").join("status"), &[])
            .await
    }

    /// All regions known to the browser, with sizes
    pub async fn regions(&self) -> Result<Vec<RegionInfo>, TransportError> {
        self.fetch(Method::Get, ApiPath::new("regions").join("info"), &[])
            .await
    }

    /// One page of entries from a region
    pub async fn region_page(
        &self,
        region: &str,
        limit: u32,
        offset: u32,
    ) -> Result<RegionPageResponse, TransportError> {
        self.fetch(
            Method::Get,
            ApiPath::new("data").join(region),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Ask the backend to create a region of the given type
    pub async fn create_region(
        &self,
        region: &str,
        region_type: &str,
    ) -> Result<MutationResponse, TransportError> {
        self.fetch(
            Method::Post,
            ApiPath::new("regions").join(region),
            &[("type", region_type.to_string())],
        )
        .await
    }

    /// Ask the backend to destroy a region
    pub async fn delete_region(&self, region: &str) -> Result<MutationResponse, TransportError> {
        self.fetch(Method::Delete, ApiPath::new("regions").join(region), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_region_page_request_shape() {
        let mock = MockTransport::new();
        mock.reply_ok(
            Method::Get,
            "/data/my%20region",
            json!({"success": true, "entries": [], "totalSize": 0, "returnedCount": 0}),
        );
        let client = GeodeClient::new(mock);

        let page = client.region_page("my region", 100, 200).await.unwrap();
        assert!(page.success);

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/data/my%20region");
        assert_eq!(
            calls[0].query,
            vec![
                ("limit".to_string(), "100".to_string()),
                ("offset".to_string(), "200".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock = MockTransport::new();
        mock.reply_ok(Method::Get, "/regions/info", json!({"not": "a list"}));
        let client = GeodeClient::new(mock);

        let err = client.regions().await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_create_region_passes_type() {
        let mock = MockTransport::new();
        mock.reply_ok(Method::Post, "/regions/orders", json!({"success": true}));
        let client = GeodeClient::new(mock);

        let resp = client.create_region("orders", "REPLICATE").await.unwrap();
        assert!(resp.success);
        let calls = client.transport().calls();
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(
            calls[0].query,
            vec![("type".to_string(), "REPLICATE".to_string())]
        );
    }
}
