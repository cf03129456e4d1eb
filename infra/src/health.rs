//! Backend health reporting for the `/health` endpoint

use crate::Infrastructure;

/// Outcome of checking one connected backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHealth {
    pub name: &'static str,
    pub healthy: bool,
    pub detail: String,
}

impl ComponentHealth {
    pub fn up(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            healthy: true,
            detail: detail.into(),
        }
    }

    pub fn down(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            healthy: false,
            detail: detail.into(),
        }
    }
}

/// Health of every backend the process connected to
///
/// In-memory backends are not listed; a report with no components is healthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub components: Vec<ComponentHealth>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.components.iter().all(|c| c.healthy)
    }

    pub fn status(&self) -> &'static str {
        if self.is_healthy() {
            "healthy"
        } else {
            "unhealthy"
        }
    }
}

impl Infrastructure {
    /// Ping MySQL and Redis when they were selected
    pub async fn health(&self) -> HealthReport {
        let mut components = Vec::new();

        if let Some(pool) = &self.database {
            components.push(match pool.health_check().await {
                Ok(true) => ComponentHealth::up("mysql", pool.get_statistics().to_string()),
                Ok(false) => ComponentHealth::down("mysql", "unexpected SELECT 1 result"),
                Err(e) => ComponentHealth::down("mysql", e.to_string()),
            });
        }

        if let Some(redis) = &self.redis {
            components.push(match redis.health_check().await {
                Ok(true) => ComponentHealth::up("redis", "PONG"),
                Ok(false) => ComponentHealth::down("redis", "unexpected PING reply"),
                Err(e) => ComponentHealth::down("redis", e.to_string()),
            });
        }

        let report = HealthReport { components };
        if !report.is_healthy() {
            tracing::warn!(?report, "Backend health check failed");
        }
        report
    }
}
