//! Cluster status monitor
//!
//! Polls `/cluster/status` and keeps the last known [`ClusterStatus`]. Every
//! poll produces a status, failed ones included, and every applied status is
//! pushed to the renderer so the indicator never freezes. Polls are ticketed:
//! a slow poll that lands after a newer one has been applied is ignored.

use crate::sequence::{Sequencer, Ticket};
use crate::types::ClusterStatus;
use crate::view::{ClusterInfoView, Renderer, StatusIndicatorView};
use geode_rs::{GeodeClient, Transport};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct ClusterStatusMonitor {
    sequencer: Arc<Sequencer>,
    applied: Option<Ticket>,
    status: Option<ClusterStatus>,
    interval: Duration,
}

impl ClusterStatusMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            sequencer: Arc::new(Sequencer::new()),
            applied: None,
            status: None,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> Option<&ClusterStatus> {
        self.status.as_ref()
    }

    /// Ticket source for polls started off the owner's task
    pub fn sequencer(&self) -> Arc<Sequencer> {
        Arc::clone(&self.sequencer)
    }

    pub fn begin_poll(&self) -> Ticket {
        self.sequencer.issue()
    }

    /// Fetch and classify one status; transport failures become an error status
    pub async fn fetch<T: Transport>(client: &GeodeClient<T>) -> ClusterStatus {
        match client.cluster_status().await {
            Ok(resp) => ClusterStatus::from_response(resp),
            Err(e) => {
                tracing::warn!("Cluster status poll failed: {}", e);
                ClusterStatus::failed(crate::errors::format_transport_error(&e))
            }
        }
    }

    /// Replace the held status and render it
    ///
    /// Returns false when the result is older than one already applied.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        status: ClusterStatus,
        renderer: &mut impl Renderer,
    ) -> bool {
        if let Some(applied) = self.applied
            && ticket < applied
        {
            tracing::debug!("Dropping status poll {} (already showing {})", ticket, applied);
            return false;
        }

        renderer.status_indicator(StatusIndicatorView::from_status(&status));
        renderer.cluster_info(ClusterInfoView::from_status(&status));
        self.applied = Some(ticket);
        self.status = Some(status);
        true
    }

    /// One complete poll: ticket, fetch, apply
    pub async fn poll<T: Transport>(
        &mut self,
        client: &GeodeClient<T>,
        renderer: &mut impl Renderer,
    ) -> bool {
        let ticket = self.begin_poll();
        let status = Self::fetch(client).await;
        self.apply(ticket, status, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::ConnectionState;
    use crate::testing::RecordingRenderer;
    use geode_rs::mock::MockTransport;
    use geode_rs::{Method, TransportError};
    use serde_json::json;

    fn client(mock: MockTransport) -> GeodeClient<MockTransport> {
        GeodeClient::new(mock)
    }

    #[tokio::test]
    async fn test_poll_outcomes_all_render() {
        let mock = MockTransport::new();
        mock.reply_ok(
            Method::Get,
            "/cluster/status",
            json!({"status": "connected", "memberCount": 2, "members": []}),
        );
        mock.reply_ok(Method::Get, "/cluster/status", json!({"status": "disconnected"}));
        mock.reply_err(
            Method::Get,
            "/cluster/status",
            TransportError::Connection("connection refused".to_string()),
        );
        let client = client(mock);
        let mut monitor = ClusterStatusMonitor::new(Duration::from_secs(5));
        let mut renderer = RecordingRenderer::default();

        for _ in 0..3 {
            assert!(monitor.poll(&client, &mut renderer).await);
        }

        let texts: Vec<_> = renderer.statuses.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Connected - 2 member(s)",
                "Disconnected",
                "Error: Connection refused - is the data browser running?",
            ]
        );
        assert_eq!(renderer.cluster_infos.len(), 3);
        assert_eq!(monitor.status().unwrap().state, ConnectionState::Error);
    }

    #[tokio::test]
    async fn test_malformed_status_is_error() {
        let mock = MockTransport::new();
        mock.reply_ok(Method::Get, "/cluster/status", json!("<html>oops</html>"));
        let client = client(mock);

        let status = ClusterStatusMonitor::fetch(&client).await;
        assert_eq!(status.state, ConnectionState::Error);
        assert!(status.error_message.unwrap().starts_with("Malformed response"));
    }

    #[test]
    fn test_older_poll_is_ignored() {
        let mut monitor = ClusterStatusMonitor::new(Duration::from_secs(5));
        let mut renderer = RecordingRenderer::default();

        let slow = monitor.begin_poll();
        let fast = monitor.begin_poll();

        assert!(monitor.apply(fast, ClusterStatus::failed("new"), &mut renderer));
        assert!(!monitor.apply(slow, ClusterStatus::failed("old"), &mut renderer));

        assert_eq!(renderer.statuses.len(), 1);
        assert_eq!(
            monitor.status().unwrap().error_message.as_deref(),
            Some("new")
        );
    }
}
