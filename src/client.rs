// HTTP client for the Locust control API
//
// Wraps four control operations: start load, stop load, readiness probe
// and statistics fetch. Endpoints are documented in locust/web.py.

use reqwest::{Response, StatusCode, Url};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{StatsResponse, SwarmResponse};

/// Relative path for starting or resizing a load run
const SWARM_PATH: &str = "/swarm";

/// Relative path for stopping a running load run
const STOP_PATH: &str = "/stop";

/// Relative path of the stats-reset endpoint, used as a readiness probe
const RESET_PATH: &str = "/stats/reset";

/// Relative path for aggregated run statistics
const STATS_PATH: &str = "/stats/requests";

/// Client for a single Locust control endpoint
#[derive(Debug)]
pub struct LocustClient {
    /// Parsed base URL, immutable after construction
    base_url: Url,

    /// Shared HTTP client with a bounded total request timeout
    http: reqwest::Client,

    /// Request-schema and timeout settings
    config: ClientConfig,
}

impl LocustClient {
    /// Create a client for the given base endpoint with default settings
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, ClientConfig::default())
    }

    /// Create a client with explicit configuration
    pub fn with_config(endpoint: &str, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.host_str().map_or(true, str::is_empty) {
            return Err(ClientError::InvalidEndpoint {
                url: endpoint.to_string(),
                reason: "host is empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url,
            http,
            config,
        })
    }

    /// The configured base endpoint
    pub fn endpoint(&self) -> &str {
        self.base_url.as_str()
    }

    /// Start load generation, or resize the run if one is already active.
    ///
    /// `user_count` is the target number of simulated users, `hatch_rate`
    /// the rate at which new users are introduced. The form field names
    /// and hatch-rate encoding follow the configured schema variant.
    pub async fn start_load(&self, user_count: u64, hatch_rate: f64) -> Result<SwarmResponse> {
        let url = self.control_url(SWARM_PATH)?;
        let form = [
            (
                self.config.field_naming.user_count_field(),
                user_count.to_string(),
            ),
            ("hatch_rate", self.config.hatch_rate_format.encode(hatch_rate)),
        ];

        tracing::debug!(
            url = %url,
            user_count,
            hatch_rate,
            "Requesting load generation"
        );

        let response = self.http.post(url).form(&form).send().await?;
        self.decode_swarm(response).await
    }

    /// Stop the current load run
    pub async fn stop_load(&self) -> Result<SwarmResponse> {
        let url = self.control_url(STOP_PATH)?;
        tracing::debug!(url = %url, "Requesting load stop");

        let response = self.http.get(url).send().await?;
        self.decode_swarm(response).await
    }

    /// Probe whether the server is ready to begin a new run.
    ///
    /// HTTP 200 from the stats-reset endpoint is the sole readiness
    /// signal; the response body is not inspected.
    pub async fn is_ready(&self) -> Result<bool> {
        let url = self.control_url(RESET_PATH)?;
        let response = self.http.get(url).send().await?;

        let ready = response.status() == StatusCode::OK;
        tracing::debug!(status = %response.status(), ready, "Readiness probe");
        Ok(ready)
    }

    /// Fetch aggregated run statistics
    pub async fn stats(&self) -> Result<StatsResponse> {
        let url = self.control_url(STATS_PATH)?;
        tracing::debug!(url = %url, "Fetching statistics");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(ClientError::ServerRejected {
                status: status.as_u16(),
                message: body,
            });
        }

        let stats: StatsResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            total_rps = stats.total_rps,
            user_count = stats.user_count,
            state = %stats.state,
            "Received statistics"
        );
        Ok(stats)
    }

    /// Current aggregate throughput, shorthand for [`Self::stats`]
    pub async fn current_rps(&self) -> Result<f64> {
        Ok(self.stats().await?.total_rps)
    }

    fn control_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Shared decode path for the start/stop endpoints
    async fn decode_swarm(&self, response: Response) -> Result<SwarmResponse> {
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!(status = %status, body = %body, "Control request rejected");
            return Err(ClientError::ServerRejected {
                status: status.as_u16(),
                message: body,
            });
        }

        let swarm: SwarmResponse = serde_json::from_str(&body)?;
        if !swarm.success {
            tracing::warn!(message = %swarm.message, "Server refused the requested action");
            return Err(ClientError::ServerRejected {
                status: status.as_u16(),
                message: swarm.message,
            });
        }

        Ok(swarm)
    }
}
