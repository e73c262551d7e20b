//! Scripted transport for tests
//!
//! Routes are keyed by method and encoded path. Each route holds a queue of
//! replies; the last reply of a queue is sticky so periodic callers keep
//! getting an answer. Unscripted routes fail with a connection error.

use crate::error::TransportError;
use crate::transport::{ApiPath, Method, Query, Transport};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// A request observed by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub at: Instant,
}

#[derive(Debug, Clone)]
struct Reply {
    delay: Duration,
    result: Result<Value, TransportError>,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`, answered after `delay`
    pub fn reply(
        &self,
        method: Method,
        path: &str,
        delay: Duration,
        result: Result<Value, TransportError>,
    ) {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Reply { delay, result });
    }

    /// Queue an immediate successful reply
    pub fn reply_ok(&self, method: Method, path: &str, body: Value) {
        self.reply(method, path, Duration::ZERO, Ok(body));
    }

    /// Queue an immediate failure
    pub fn reply_err(&self, method: Method, path: &str, err: TransportError) {
        self.reply(method, path, Duration::ZERO, Err(err));
    }

    /// Every request seen so far, in issue order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests seen for one method and path
    pub fn calls_to(&self, method: Method, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        query: Query<'_>,
    ) -> Result<Value, TransportError> {
        let path = path.to_string();
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                method,
                path: path.clone(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                at: Instant::now(),
            });

        let Some(reply) = self.next_reply(method, &path) else {
            return Err(TransportError::Connection(format!(
                "no route for {} {}",
                method, path
            )));
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
