//! HTTP client for the agent cloud job history API
//!
//! Issues a single authenticated GET per report. There is no paging and
//! no retry; any failure is returned to the caller.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{CostError, Result};
use crate::models::JobList;
use crate::validation::Credentials;

/// API version requested from the service
pub const API_VERSION: &str = "7.0";

/// Default service root
pub const DEFAULT_API_URL: &str = "https://dev.azure.com/";

/// Configuration for the job history client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. "https://dev.azure.com/"
    pub api_url: String,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Client for listing agent cloud requests
pub struct JobClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl JobClient {
    /// Create a new client
    pub fn new(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = Url::parse(&with_trailing_slash(&config.api_url))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// URL of the request listing for one agent cloud
    pub fn requests_url(&self, agent_cloud_id: &str) -> Result<Url> {
        let path = format!(
            "{}/_apis/distributedtask/agentclouds/{}/requests",
            self.credentials.organization, agent_cloud_id
        );
        let mut url = self.base_url.join(&path)?;
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// Fetch the full job list for an agent cloud
    pub async fn job_list(&self, agent_cloud_id: &str) -> Result<JobList> {
        let url = self.requests_url(agent_cloud_id)?;
        debug!(url = %url, "Requesting job list");

        // The token goes into the header as-is.
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Basic {}", self.credentials.token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CostError::Api { status, body });
        }

        let jobs: JobList = response.json().await?;
        info!(
            count = jobs.count,
            records = jobs.value.len(),
            "Fetched job list"
        );

        Ok(jobs)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
