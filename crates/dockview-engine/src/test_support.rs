//! Test support utilities for dockview-engine
//!
//! Provides MockTransport and JSON fixtures for exercising the EngineClient
//! without a running Docker daemon.

use crate::transport::{EngineResponse, EngineTransport, Method};
use crate::{EngineError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub method: Method,
    /// Path plus query, e.g. `/v1.47/containers/json?all=true`
    pub path: String,
    /// Full request URL
    pub url: String,
}

/// Scripted reply for a route
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond { status: u16, body: String },
    Fail(EngineError),
}

/// Transport that answers from a route table and records every request.
///
/// Routes are keyed by method and path-plus-query. Unknown routes get the
/// Engine's 404 reply.
#[derive(Default)]
pub struct MockTransport {
    pub calls: Arc<Mutex<Vec<MockCall>>>,
    routes: Arc<Mutex<HashMap<(Method, String), MockReply>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `method path` with `status` and `body`
    pub fn on(self, method: Method, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            MockReply::Respond {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Fail `method path` before any reply arrives
    pub fn fail(self, method: Method, path: &str, error: EngineError) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), MockReply::Fail(error));
        self
    }
}

#[async_trait]
impl EngineTransport for MockTransport {
    async fn send(&self, method: Method, url: &Url) -> Result<EngineResponse> {
        let path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        self.calls.lock().unwrap().push(MockCall {
            method,
            path: path.clone(),
            url: url.to_string(),
        });

        let reply = self.routes.lock().unwrap().get(&(method, path)).cloned();
        match reply {
            Some(MockReply::Respond { status, body }) => Ok(EngineResponse::new(status, body)),
            Some(MockReply::Fail(error)) => Err(error),
            None => Ok(EngineResponse::new(404, r#"{"message":"page not found"}"#)),
        }
    }
}

/// `GET /containers/json` body with one summary per id
pub fn containers_json(ids: &[&str]) -> String {
    let summaries: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "Id": id,
                "Names": [format!("/{}", id)],
                "Image": "alpine:latest",
                "ImageID": "sha256:mock_image_id",
                "Command": "sh",
                "Created": 1700000000,
                "Ports": [],
                "Labels": {},
                "State": "running",
                "Status": "Up 2 hours"
            })
        })
        .collect();
    Value::Array(summaries).to_string()
}

/// `GET /containers/{id}/json` body
pub fn detail_json(id: &str, name: &str, image: &str, running: bool) -> String {
    json!({
        "Id": id,
        "Name": format!("/{}", name),
        "Created": "2024-10-07T13:39:07.000000000Z",
        "Config": { "Image": image },
        "State": {
            "Status": if running { "running" } else { "exited" },
            "Running": running
        },
        "HostConfig": { "CpuPercent": 0 },
        "NetworkSettings": {
            "Ports": if running {
                json!({ "80/tcp": [{ "HostIp": "0.0.0.0", "HostPort": "8080" }] })
            } else {
                json!({})
            }
        }
    })
    .to_string()
}

/// One entry of the `Images` array in `GET /system/df`
pub fn image_json(id: &str, repo_tags: &[&str], containers: i64) -> Value {
    json!({
        "Id": id,
        "ParentId": "",
        "RepoTags": repo_tags,
        "Created": 1644009612,
        "Size": 172064416,
        "SharedSize": 0,
        "Containers": containers
    })
}

/// `GET /system/df` body carrying `images`
pub fn system_df_json(images: &[Value]) -> String {
    json!({
        "LayersSize": 0,
        "Images": images,
        "Containers": [],
        "Volumes": [],
        "BuildCache": []
    })
    .to_string()
}
