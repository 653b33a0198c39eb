//! Docker Engine API client
//!
//! Every call is a fresh round trip; nothing is cached between calls.

use crate::operation::{Operation, OperationResult};
use crate::transport::{EngineResponse, EngineTransport, HttpTransport, Method};
use crate::types::{ContainerDetail, ContainerSummary, ImageSummary};
use crate::{EngineError, Result};
use dockview_config::{ConnectionSettings, DEFAULT_API_VERSION, DEFAULT_ENGINE_URL};
use futures::future::try_join_all;
use reqwest::Url;

/// Client for the subset of the Engine API dockview uses
pub struct EngineClient {
    settings: ConnectionSettings,
    transport: Box<dyn EngineTransport>,
}

impl EngineClient {
    /// Create a client that talks HTTP to the configured engine
    pub fn new(settings: ConnectionSettings) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(settings, Box::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(settings: ConnectionSettings, transport: Box<dyn EngineTransport>) -> Self {
        if try_resolve_base_url(&settings).is_none() {
            tracing::warn!(
                "Invalid engine URL {:?} with API version {:?}, using {}/{}",
                settings.engine_url,
                settings.api_version,
                DEFAULT_ENGINE_URL,
                DEFAULT_API_VERSION
            );
        }

        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Base URL all endpoints hang off, e.g. `http://127.0.0.1:2375/v1.47`
    pub fn resolve_base_url(&self) -> Url {
        resolve_base_url(&self.settings)
    }

    /// Each segment is appended percent-encoded, so an ID can never add or
    /// climb path levels.
    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Url {
        let mut url = self.resolve_base_url();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.set_query(query);
        url
    }

    async fn send(&self, method: Method, segments: &[&str], query: Option<&str>) -> Result<EngineResponse> {
        let url = self.endpoint(segments, query);
        tracing::debug!("{} {}", method, url);

        let response = self.transport.send(method, &url).await?;
        tracing::debug!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }

    /// Check that the engine answers at all
    pub async fn ping(&self) -> Result<()> {
        self.send(Method::Get, &["_ping"], None)
            .await?
            .expect_status(&[200])
    }

    /// `GET /containers/json`
    pub async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>> {
        let query = format!("all={}", all);
        let response = self.send(Method::Get, &["containers", "json"], Some(&query)).await?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// `GET /containers/{id}/json`
    pub async fn get_container_detail(&self, id: &str) -> Result<ContainerDetail> {
        let response = self
            .send(Method::Get, &["containers", id, "json"], None)
            .await?;
        if response.status == 404 {
            return Err(EngineError::ContainerNotFound(id.to_string()));
        }
        response.expect_status(&[200])?;
        response.json()
    }

    /// List every container, then fetch all details concurrently.
    ///
    /// Fails as a whole if the listing or any single detail fails; a partial
    /// list is never returned.
    pub async fn list_all_container_details(&self) -> Result<Vec<ContainerDetail>> {
        let summaries = self.list_containers(true).await?;
        tracing::debug!("Fetching details for {} containers", summaries.len());

        try_join_all(
            summaries
                .iter()
                .map(|summary| self.get_container_detail(summary.id.as_ref())),
        )
        .await
        .inspect_err(|e| tracing::debug!("Container detail fetch failed: {}", e))
    }

    /// `POST /containers/{id}/start`
    pub async fn start_container(&self, id: &str) -> OperationResult {
        self.operate(
            Operation::StartContainer,
            id,
            Method::Post,
            &["containers", id, "start"],
            None,
        )
        .await
    }

    /// `POST /containers/{id}/stop`
    pub async fn stop_container(&self, id: &str) -> OperationResult {
        self.operate(
            Operation::StopContainer,
            id,
            Method::Post,
            &["containers", id, "stop"],
            None,
        )
        .await
    }

    /// `DELETE /containers/{id}?force=`
    pub async fn remove_container(&self, id: &str, force: bool) -> OperationResult {
        let query = format!("force={}", force);
        self.operate(
            Operation::RemoveContainer,
            id,
            Method::Delete,
            &["containers", id],
            Some(&query),
        )
        .await
    }

    /// Images from `GET /system/df`
    pub async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let response = self.send(Method::Get, &["system", "df"], None).await?;
        response.expect_status(&[200])?;

        let mut usage: serde_json::Value = response.json()?;
        let images = usage
            .get_mut("Images")
            .map(serde_json::Value::take)
            .ok_or(EngineError::MissingField("Images"))?;

        Ok(serde_json::from_value(images)?)
    }

    /// `DELETE /images/{id}`
    pub async fn remove_image(&self, id: &str) -> OperationResult {
        self.operate(
            Operation::RemoveImage,
            id,
            Method::Delete,
            &["images", id],
            None,
        )
        .await
    }

    /// Single attempt; the caller decides whether to try again
    async fn operate(
        &self,
        operation: Operation,
        target: &str,
        method: Method,
        segments: &[&str],
        query: Option<&str>,
    ) -> OperationResult {
        let result = match self.send(method, segments, query).await {
            Ok(response) => OperationResult::from_response(operation, target, &response),
            Err(e) => OperationResult::transport_failure(operation, target, &e),
        };

        tracing::debug!("{} -> {}", operation, result.category);
        result
    }
}

/// Join the API version onto the engine URL.
///
/// Anything that does not yield an absolute http(s) URL falls back to
/// [`DEFAULT_ENGINE_URL`] / [`DEFAULT_API_VERSION`]; this never fails.
pub fn resolve_base_url(settings: &ConnectionSettings) -> Url {
    try_resolve_base_url(settings).unwrap_or_else(default_base_url)
}

/// Like [`resolve_base_url`] but `None` instead of the fallback
pub fn try_resolve_base_url(settings: &ConnectionSettings) -> Option<Url> {
    try_base_url(&settings.engine_url, &settings.api_version)
}

fn try_base_url(engine_url: &str, api_version: &str) -> Option<Url> {
    let base = Url::parse(engine_url.trim()).ok()?;
    let url = base.join(api_version.trim()).ok()?;

    let usable = matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| !h.is_empty());
    usable.then_some(url)
}

fn default_base_url() -> Url {
    try_base_url(DEFAULT_ENGINE_URL, DEFAULT_API_VERSION)
        .expect("built-in engine defaults form a valid URL")
}
