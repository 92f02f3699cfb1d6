// Response models for the Locust control API
//
// Field names follow the JSON bodies served by locust/web.py. All models
// are transient: decoded from a response, handed to the caller, never
// retained by the client.

use serde::{Deserialize, Serialize};

/// Response from the start-load and stop-load endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmResponse {
    pub message: String,
    pub success: bool,
}

/// Aggregated metrics from the statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub current_response_time_percentile_50: f64,
    pub current_response_time_percentile_95: f64,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    /// Fraction of failed requests, 0.0 to 1.0
    pub fail_ratio: f64,
    /// Free-form run state label, e.g. "running" or "stopped"
    pub state: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Aggregate requests per second across all endpoints
    pub total_rps: f64,
    /// Number of simulated users currently hatched
    pub user_count: u64,
}

/// Per-tested-endpoint counters, part of [`StatsResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub avg_content_length: f64,
    pub avg_response_time: f64,
    pub current_rps: f64,
    pub max_response_time: f64,
    pub median_response_time: f64,
    pub method: String,
    pub min_response_time: f64,
    pub name: String,
    pub num_failures: u64,
    pub num_requests: u64,
}

/// Aggregated error record, part of [`StatsResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub error: String,
    pub method: String,
    pub name: String,
    pub occurrences: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_BODY: &str = r#"{
        "current_response_time_percentile_50": 11,
        "current_response_time_percentile_95": 22,
        "errors": [],
        "fail_ratio": 0.31311475409836065,
        "state": "running",
        "stats": [],
        "total_rps": 9.9,
        "user_count": 5
    }"#;

    #[test]
    fn test_stats_response_decoding() {
        let stats: StatsResponse = serde_json::from_str(STATS_BODY).unwrap();
        assert_eq!(stats.current_response_time_percentile_50, 11.0);
        assert_eq!(stats.current_response_time_percentile_95, 22.0);
        assert_eq!(stats.state, "running");
        assert_eq!(stats.total_rps, 9.9);
        assert_eq!(stats.user_count, 5);
        assert!(stats.errors.is_empty());
        assert!(stats.stats.is_empty());
    }

    #[test]
    fn test_stats_response_missing_lists_default_empty() {
        let body = r#"{
            "current_response_time_percentile_50": 1,
            "current_response_time_percentile_95": 2,
            "fail_ratio": 0.0,
            "state": "stopped",
            "total_rps": 0.0,
            "user_count": 0
        }"#;
        let stats: StatsResponse = serde_json::from_str(body).unwrap();
        assert!(stats.errors.is_empty());
        assert!(stats.stats.is_empty());
    }

    #[test]
    fn test_stat_and_error_entries() {
        let body = r#"{
            "current_response_time_percentile_50": 120,
            "current_response_time_percentile_95": 460,
            "errors": [
                {"error": "ConnectionError", "method": "GET", "name": "/api", "occurrences": 3}
            ],
            "fail_ratio": 0.05,
            "state": "running",
            "stats": [
                {
                    "avg_content_length": 512.0,
                    "avg_response_time": 130.5,
                    "current_rps": 4.2,
                    "max_response_time": 900.0,
                    "median_response_time": 110.0,
                    "method": "GET",
                    "min_response_time": 40.0,
                    "name": "/api",
                    "num_failures": 3,
                    "num_requests": 57
                }
            ],
            "total_rps": 4.2,
            "user_count": 2
        }"#;
        let stats: StatsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(stats.stats.len(), 1);
        assert_eq!(stats.stats[0].name, "/api");
        assert_eq!(stats.stats[0].num_requests, 57);
        assert_eq!(stats.errors.len(), 1);
        assert_eq!(stats.errors[0].error, "ConnectionError");
        assert_eq!(stats.errors[0].occurrences, 3);
    }

    #[test]
    fn test_swarm_response_decoding() {
        let body = r#"{"message": "Swarming started", "success": true}"#;
        let swarm: SwarmResponse = serde_json::from_str(body).unwrap();
        assert_eq!(swarm.message, "Swarming started");
        assert!(swarm.success);
    }
}
