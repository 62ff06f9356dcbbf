use crate::domain::{
    AgentEndpoint, AssessOutcome, AssessRequest, ComposeRuntime, HealthReply, ServiceHealth,
};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory stand-in for the compose runtime. Records every operation in
/// order and can be told to fail a single operation kind.
pub struct MockStack {
    commands: RwLock<Vec<String>>,
    health: RwLock<HashMap<String, ServiceHealth>>,
    fail_on: RwLock<Option<String>>,
}

impl MockStack {
    pub fn new() -> Self {
        Self {
            commands: RwLock::new(Vec::new()),
            health: RwLock::new(HashMap::new()),
            fail_on: RwLock::new(None),
        }
    }

    pub fn set_health(&self, service: &str, health: ServiceHealth) {
        self.health
            .write()
            .unwrap()
            .insert(service.to_string(), health);
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRuntime for MockStack {
    fn build_images(&self) -> Result<()> {
        self.record_command("build");
        self.check_fail("build")?;
        Ok(())
    }

    fn start_detached(&self, service: &str) -> Result<()> {
        self.record_command(&format!("up_detached:{}", service));
        self.check_fail("up_detached")?;
        Ok(())
    }

    fn run_to_exit(&self, service: &str) -> Result<()> {
        self.record_command(&format!("run:{}", service));
        self.check_fail("run")?;
        Ok(())
    }

    fn service_health(&self, service: &str) -> Result<ServiceHealth> {
        self.record_command(&format!("health:{}", service));
        self.check_fail("health")?;

        let health = self
            .health
            .read()
            .unwrap()
            .get(service)
            .cloned()
            .unwrap_or(ServiceHealth::Unknown("not set".to_string()));

        Ok(health)
    }

    fn dump_logs(&self, service: &str) -> Result<()> {
        self.record_command(&format!("logs:{}", service));
        self.check_fail("logs")?;
        Ok(())
    }

    fn down(&self) -> Result<()> {
        self.record_command("down");
        self.check_fail("down")?;
        Ok(())
    }
}

/// In-memory stand-in for the agent's HTTP surface. Healthy and passing by
/// default; tests override per scenario.
pub struct MockAgent {
    commands: RwLock<Vec<String>>,
    health_status: RwLock<Option<String>>,
    assessment: RwLock<AssessOutcome>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self {
            commands: RwLock::new(Vec::new()),
            health_status: RwLock::new(Some("healthy".to_string())),
            assessment: RwLock::new(AssessOutcome::Passed {
                sentiment: "positive".to_string(),
            }),
        }
    }

    /// Sets the status string GET /health answers with
    pub fn set_health_status(&self, status: &str) {
        *self.health_status.write().unwrap() = Some(status.to_string());
    }

    /// Makes GET /health fail at the transport level
    pub fn set_health_unreachable(&self) {
        *self.health_status.write().unwrap() = None;
    }

    pub fn set_assessment(&self, outcome: AssessOutcome) {
        *self.assessment.write().unwrap() = outcome;
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentEndpoint for MockAgent {
    fn health(&self) -> Result<HealthReply> {
        self.record_command("GET /health");

        match &*self.health_status.read().unwrap() {
            Some(status) => Ok(HealthReply {
                status: status.clone(),
            }),
            None => bail!("connection refused"),
        }
    }

    fn assess(&self, request: &AssessRequest) -> AssessOutcome {
        self.record_command(&format!("POST /assess:{}", request.task));
        self.assessment.read().unwrap().clone()
    }
}
