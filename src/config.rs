// Client and ramp controller configuration
//
// Locust deployments disagree on the start-load form schema: older servers
// expect a `locust_count` field and an integer hatch rate, newer ones take
// `user_count` and a float. Both are supported here as configuration
// instead of hard-coding one variant.

use std::time::Duration;

/// Total round-trip timeout applied to every control request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Delay between throughput polls inside the ramp loop
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Hatch rate used by the ramp controller when starting load
pub const DEFAULT_HATCH_RATE: f64 = 1.0;

/// Name of the simulated-user-count field in the start-load form body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldNaming {
    /// Sends `user_count` (Locust >= 1.0)
    UserCount,
    /// Sends `locust_count` (pre-1.0 servers)
    LocustCount,
}

impl FieldNaming {
    /// Form field name for the simulated-user count
    pub fn user_count_field(self) -> &'static str {
        match self {
            FieldNaming::UserCount => "user_count",
            FieldNaming::LocustCount => "locust_count",
        }
    }
}

/// Wire encoding of the hatch rate in the start-load form body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HatchRateFormat {
    /// Sends the rate as a decimal number, e.g. `0.5`
    Float,
    /// Truncates the rate to a whole number, e.g. `1`
    Integer,
}

impl HatchRateFormat {
    /// Encode a hatch rate for the form body
    pub fn encode(self, hatch_rate: f64) -> String {
        match self {
            HatchRateFormat::Float => format!("{}", hatch_rate),
            HatchRateFormat::Integer => format!("{}", hatch_rate.trunc() as i64),
        }
    }
}

/// Client settings
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Total request timeout for every HTTP round trip
    pub request_timeout: Duration,

    /// Naming convention for the start-load user-count field
    pub field_naming: FieldNaming,

    /// Wire encoding of the hatch rate
    pub hatch_rate_format: HatchRateFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            field_naming: FieldNaming::UserCount,
            hatch_rate_format: HatchRateFormat::Float,
        }
    }
}

impl ClientConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_field_naming(mut self, naming: FieldNaming) -> Self {
        self.field_naming = naming;
        self
    }

    pub fn with_hatch_rate_format(mut self, format: HatchRateFormat) -> Self {
        self.hatch_rate_format = format;
        self
    }
}

/// Ramp controller settings
#[derive(Clone, Debug)]
pub struct RampConfig {
    /// Rate at which new simulated users are introduced (users per second)
    pub hatch_rate: f64,

    /// Delay between consecutive throughput polls
    pub poll_interval: Duration,

    /// User-count increment while far below the extrapolated target
    pub far_step: u64,

    /// User-count increment once close to the extrapolated target
    pub near_step: u64,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            hatch_rate: DEFAULT_HATCH_RATE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            far_step: 5,
            near_step: 1,
        }
    }
}

impl RampConfig {
    pub fn with_hatch_rate(mut self, hatch_rate: f64) -> Self {
        self.hatch_rate = hatch_rate;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_steps(mut self, far_step: u64, near_step: u64) -> Self {
        self.far_step = far_step;
        self.near_step = near_step;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.field_naming, FieldNaming::UserCount);
        assert_eq!(config.hatch_rate_format, HatchRateFormat::Float);
    }

    #[test]
    fn test_field_naming_variants() {
        assert_eq!(FieldNaming::UserCount.user_count_field(), "user_count");
        assert_eq!(FieldNaming::LocustCount.user_count_field(), "locust_count");
    }

    #[test]
    fn test_hatch_rate_encoding() {
        assert_eq!(HatchRateFormat::Float.encode(0.5), "0.5");
        assert_eq!(HatchRateFormat::Float.encode(1.0), "1");
        assert_eq!(HatchRateFormat::Integer.encode(2.9), "2");
        assert_eq!(HatchRateFormat::Integer.encode(1.0), "1");
    }

    #[test]
    fn test_ramp_defaults() {
        let config = RampConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.far_step, 5);
        assert_eq!(config.near_step, 1);
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::default()
            .with_request_timeout(Duration::from_secs(5))
            .with_field_naming(FieldNaming::LocustCount)
            .with_hatch_rate_format(HatchRateFormat::Integer);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.field_naming, FieldNaming::LocustCount);
        assert_eq!(config.hatch_rate_format, HatchRateFormat::Integer);

        let ramp = RampConfig::default()
            .with_hatch_rate(0.1)
            .with_poll_interval(Duration::from_millis(50))
            .with_steps(10, 2);
        assert_eq!(ramp.hatch_rate, 0.1);
        assert_eq!(ramp.poll_interval, Duration::from_millis(50));
        assert_eq!(ramp.far_step, 10);
        assert_eq!(ramp.near_step, 2);
    }
}
