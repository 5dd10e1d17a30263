mod builds;
mod jobs;
mod logs;
mod reports;
mod system;

pub use builds::DEFAULT_HISTORY_LIMIT;

use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::{ClientConfig, LogLimits};
use crate::error::{JenkinsError, Result};

use super::links::{endpoint, job_segments, BuildRef};

pub(super) const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
pub(super) const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
pub(super) const REPORT_TIMEOUT: Duration = Duration::from_secs(15);
pub(super) const SCAN_TIMEOUT: Duration = Duration::from_secs(30);

const ERROR_BODY_LOG_LIMIT: usize = 200;

/// Read-only Jenkins REST client.
///
/// Holds the immutable configuration and a pooled HTTP client. Every query
/// method issues its own GET with a fixed timeout; nothing is cached or
/// retried.
pub struct JenkinsClient {
    client: Client,
    config: ClientConfig,
}

impl JenkinsClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jenkins-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JenkinsError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn log_limits(&self) -> LogLimits {
        self.config.logs
    }

    pub fn is_authenticated(&self) -> bool {
        self.config.credentials.is_some()
    }

    /// Attaches Basic auth when both user and token are configured.
    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(creds) = &self.config.credentials {
            request.basic_auth(&creds.user, Some(creds.token.as_str()))
        } else {
            request
        }
    }

    pub(super) fn root_url(&self, trailing: &[&str]) -> Result<Url> {
        endpoint(&self.config.base_url, trailing)
    }

    pub(super) fn job_url(&self, job_name: &str, trailing: &[&str]) -> Result<Url> {
        let mut segments = job_segments(job_name)?;
        segments.extend(trailing.iter().map(|s| (*s).to_string()));
        endpoint(&self.config.base_url, &segments)
    }

    pub(super) fn build_url(&self, job_name: &str, build: &BuildRef, trailing: &[&str]) -> Result<Url> {
        let mut segments = job_segments(job_name)?;
        segments.push(build.path_segment());
        segments.extend(trailing.iter().map(|s| (*s).to_string()));
        endpoint(&self.config.base_url, &segments)
    }

    /// Issues one GET and maps non-success statuses onto the error taxonomy.
    /// `resource` names what was asked for, e.g. `job 'app'`.
    pub(super) async fn get(
        &self,
        url: Url,
        tree: Option<&str>,
        timeout: Duration,
        resource: &str,
    ) -> Result<Response> {
        debug!("GET {url} (tree: {tree:?}, timeout: {}s)", timeout.as_secs());

        let mut request = self.client.get(url).timeout(timeout);
        if let Some(tree) = tree {
            request = request.query(&[("tree", tree)]);
        }

        let response = self
            .auth_request(request)
            .send()
            .await
            .map_err(JenkinsError::from_transport)?;

        check_status(response, resource).await
    }

    pub(super) async fn get_json<T>(
        &self,
        url: Url,
        tree: Option<&str>,
        timeout: Duration,
        resource: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get(url, tree, timeout, resource)
            .await?
            .json::<T>()
            .await
            .map_err(JenkinsError::from_transport)
    }

    pub(super) async fn get_text(&self, url: Url, timeout: Duration, resource: &str) -> Result<String> {
        self.get(url, None, timeout, resource)
            .await?
            .text()
            .await
            .map_err(JenkinsError::from_transport)
    }
}

async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(JenkinsError::NotFound(resource.to_string())),
        StatusCode::UNAUTHORIZED => Err(JenkinsError::Unauthenticated),
        StatusCode::FORBIDDEN => Err(JenkinsError::Forbidden(resource.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_LOG_LIMIT).collect();
            debug!("Jenkins returned {status} for {resource}: {excerpt}");

            Err(JenkinsError::Upstream {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected response status")
                    .to_string(),
                code: "HTTP_STATUS".to_string(),
            })
        }
    }
}

pub(super) fn job_resource(job_name: &str) -> String {
    format!("job '{job_name}'")
}

pub(super) fn build_resource(job_name: &str, build: &BuildRef) -> String {
    format!("build {build} of job '{job_name}'")
}
