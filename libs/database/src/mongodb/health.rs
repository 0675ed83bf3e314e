use mongodb::Client;
use std::time::Instant;

use super::connector::ping;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    /// Collapse into the `Result` shape expected by readiness probes.
    pub fn into_result(self) -> Result<(), String> {
        if self.healthy {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

/// Check MongoDB health with a `ping`, recording latency and any error.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let status = check_health(&client).await;
/// if !status.healthy {
///     tracing::warn!(message = ?status.message, "MongoDB unhealthy");
/// }
/// ```
pub async fn check_health(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_status_into_result_keeps_message() {
        let status = HealthStatus {
            healthy: false,
            message: Some("connection refused".to_string()),
            response_time_ms: 3,
        };
        assert_eq!(status.into_result(), Err("connection refused".to_string()));
    }

    #[test]
    fn test_healthy_status_into_result() {
        let status = HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: 1,
        };
        assert!(status.into_result().is_ok());
    }
}
