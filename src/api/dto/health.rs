//! Body of `GET /health`.

use serde::Serialize;

/// Overall health with one entry per dependency.
///
/// `status` is `"healthy"` when every check passed, `"degraded"` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Reachability of the link store, whichever backend is configured
    /// (PostgreSQL or the in-process map).
    pub database: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `"ok"` or `"error"`.
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl CheckStatus {
    pub fn ok(message: &'static str) -> Self {
        Self {
            status: "ok",
            message: Some(message),
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            status: "error",
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

impl HealthResponse {
    /// Builds the response for the given store check, using the crate version.
    pub fn from_checks(checks: HealthChecks) -> Self {
        let status = if checks.database.is_ok() {
            "healthy"
        } else {
            "degraded"
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
