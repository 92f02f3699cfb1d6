// Throughput-seeking ramp controller
//
// Drives the client toward a target aggregate RPS: start with one
// simulated user, measure the per-user baseline, then grow the user count
// and re-issue start-load calls until the target is met or the deadline
// expires. Sequential and synchronous; the only waiting is the fixed
// inter-poll sleep.

use std::time::Duration;

use tokio::time::Instant;

use crate::client::LocustClient;
use crate::config::RampConfig;
use crate::error::{ClientError, Result};

/// Fallback run budget when the caller's duration string does not parse
const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(3600);

/// Successful ramp result
#[derive(Debug, Clone, PartialEq)]
pub struct RampOutcome {
    /// Throughput observed when the target was met
    pub achieved_rps: f64,

    /// Simulated users running at that point
    pub user_count: u64,
}

/// Ramps simulated-user count until a target throughput is reached
pub struct RampController {
    client: LocustClient,
    config: RampConfig,
}

impl RampController {
    /// Create a controller with default ramp settings
    pub fn new(client: LocustClient) -> Self {
        Self::with_config(client, RampConfig::default())
    }

    /// Create a controller with explicit ramp settings
    pub fn with_config(client: LocustClient, config: RampConfig) -> Self {
        Self { client, config }
    }

    /// The underlying client
    pub fn client(&self) -> &LocustClient {
        &self.client
    }

    /// Ramp load until `target_rps` is reached or `max_duration` elapses.
    ///
    /// `max_duration` accepts Go-style duration strings ("300ms", "90s",
    /// "5m", "1h30m"); anything unparseable falls back to one hour. The
    /// deadline bounds the whole loop, including the throughput polls.
    ///
    /// Fails with [`ClientError::ServerNotReady`] before generating any
    /// load if the readiness probe does not pass, with
    /// [`ClientError::BaselineUnavailable`] if the initial throughput
    /// cannot be measured, and with [`ClientError::DeadlineExceeded`]
    /// once past the deadline. Transport and decode errors from polling
    /// abort immediately; failed fetches are not retried.
    pub async fn swarm(&self, target_rps: f64, max_duration: &str) -> Result<RampOutcome> {
        if !self.client.is_ready().await? {
            return Err(ClientError::ServerNotReady);
        }

        let budget = match parse_max_duration(max_duration) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    max_duration,
                    "Unparseable duration, falling back to {:?}",
                    DEFAULT_MAX_DURATION
                );
                DEFAULT_MAX_DURATION
            }
        };
        let deadline = Instant::now() + budget;

        // Baseline: one user, to learn the per-user throughput
        let mut user_count: u64 = 1;
        self.client
            .start_load(user_count, self.config.hatch_rate)
            .await?;
        let initial_rps = match self.client.current_rps().await {
            Ok(rps) => rps,
            Err(e) => return Err(ClientError::BaselineUnavailable(Box::new(e))),
        };
        tracing::info!(initial_rps, target_rps, "Established baseline throughput");

        let mut current_rps = initial_rps;
        while current_rps < target_rps {
            if Instant::now() >= deadline {
                tracing::warn!(current_rps, target_rps, "Ramp deadline expired");
                return Err(ClientError::DeadlineExceeded(budget));
            }

            let needed = users_for_target(target_rps, current_rps, user_count);
            user_count += if user_count < needed {
                self.config.far_step
            } else {
                self.config.near_step
            };

            tracing::info!(user_count, current_rps, "Increasing simulated users");
            self.client
                .start_load(user_count, self.config.hatch_rate)
                .await?;

            // Wait for the new users to hatch: poll until throughput at
            // least reaches half the extrapolated rate for this count.
            current_rps = self.client.current_rps().await?;
            while current_rps < initial_rps * user_count as f64 / 2.0 {
                if Instant::now() >= deadline {
                    tracing::warn!(current_rps, target_rps, "Ramp deadline expired while polling");
                    return Err(ClientError::DeadlineExceeded(budget));
                }
                tokio::time::sleep(self.config.poll_interval).await;
                current_rps = self.client.current_rps().await?;
            }
        }

        tracing::info!(
            achieved_rps = current_rps,
            user_count,
            "Target throughput reached"
        );
        Ok(RampOutcome {
            achieved_rps: current_rps,
            user_count,
        })
    }
}

/// Linear extrapolation of the user count needed for the target rate
fn users_for_target(target_rps: f64, current_rps: f64, user_count: u64) -> u64 {
    if current_rps <= 0.0 {
        // No observed throughput yet; treat the target as far away
        return u64::MAX;
    }
    (target_rps / (current_rps / user_count as f64)) as u64
}

/// Parse Go-style duration strings such as "300ms", "90s", "5m" or "1h30m"
fn parse_max_duration(input: &str) -> Option<Duration> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let value: f64 = rest[..num_end].parse().ok()?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let seconds = match &rest[..unit_end] {
            "ms" => value / 1000.0,
            "s" => value,
            "m" => value * 60.0,
            "h" => value * 3600.0,
            _ => return None,
        };
        total += Duration::try_from_secs_f64(seconds).ok()?;
        rest = &rest[unit_end..];
    }
    Some(total)
}
