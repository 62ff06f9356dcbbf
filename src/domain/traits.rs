use super::assessment::{AssessOutcome, AssessRequest, HealthReply};
use anyhow::Result;

/// Health state reported by the orchestrator for a running service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Healthy,
    Unhealthy,
    Starting,
    NotApplicable, // No healthcheck configured
    /// Anything else the orchestrator handed back, kept verbatim for diagnostics
    Unknown(String),
}

impl ServiceHealth {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "healthy" => Self::Healthy,
            "unhealthy" => Self::Unhealthy,
            "starting" => Self::Starting,
            "" | "none" | "<no value>" => Self::NotApplicable,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl std::fmt::Display for ServiceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
            Self::Starting => write!(f, "starting"),
            Self::NotApplicable => write!(f, "no healthcheck"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Trait for compose-stack operations
pub trait ComposeRuntime: Send + Sync {
    /// Build all images declared in the stack
    fn build_images(&self) -> Result<()>;

    /// Start one service in detached mode
    fn start_detached(&self, service: &str) -> Result<()>;

    /// Run one service in the foreground, returning once its container exits
    fn run_to_exit(&self, service: &str) -> Result<()>;

    /// Get the orchestrator-reported health status of a service
    fn service_health(&self, service: &str) -> Result<ServiceHealth>;

    /// Write a service's logs to the console
    fn dump_logs(&self, service: &str) -> Result<()>;

    /// Stop and remove every service in the stack
    fn down(&self) -> Result<()>;
}

/// Trait for the agent's HTTP surface
pub trait AgentEndpoint: Send + Sync {
    /// GET /health
    fn health(&self) -> Result<HealthReply>;

    /// POST /assess. Transport and decode faults are folded into the outcome,
    /// never returned as errors.
    fn assess(&self, request: &AssessRequest) -> AssessOutcome;
}
