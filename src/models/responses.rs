//! Response DTOs for the relay API
//!
//! Defines the structure of outgoing JSON response bodies.

use axum::http::StatusCode;
use serde::Serialize;

use crate::cache::CacheStats;

/// Problem payload returned for every failed relay request.
///
/// Follows the RFC 7807 `application/problem+json` shape.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary, the canonical reason of `status`
    pub title: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Human-readable explanation of this occurrence
    pub detail: String,
}

impl ProblemDetails {
    /// Creates a problem payload for the given status and detail message.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of cached images
    pub total_entries: usize,
    /// Aggregate cost of cached images
    pub total_cost: usize,
    /// Maximum aggregate cost
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            total_cost: stats.total_cost,
            capacity: stats.capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_serialize() {
        let problem = ProblemDetails::new(StatusCode::SERVICE_UNAVAILABLE, "upstream down");
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["title"], "Service Unavailable");
        assert_eq!(json["status"], 503);
        assert_eq!(json["detail"], "upstream down");
    }

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            evictions: 0,
            total_entries: 1,
            total_cost: 500,
            capacity: 5000,
        };
        let resp = StatsResponse::from(stats);
        assert_eq!(resp.total_cost, 500);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::new(1000));
        assert_eq!(resp.hit_rate, 0.0);
        assert_eq!(resp.capacity, 1000);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
