use crate::domain::{AgentEndpoint, AssessOutcome, AssessRequest, RunSummary, ServiceHealth};
use crate::infra::results::load_results;
use crate::services::StackService;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Everything the runner needs to know about one run: which services to drive,
/// what to send, how long to wait, where the harness drops its results.
#[derive(Debug, Clone)]
pub struct WorkflowPlan {
    pub agent_service: String,
    pub harness_service: String,
    pub task: String,
    pub startup_wait: Duration,
    pub results_path: PathBuf,
}

/// What a completed run observed. Fatal paths never produce a report; they
/// surface as errors from [`WorkflowRunner::run`].
#[derive(Debug)]
pub struct WorkflowReport {
    /// GET /health answered with status "healthy"
    pub endpoint_healthy: bool,
    pub assessment: AssessOutcome,
    pub summary: Option<RunSummary>,
}

/// Drives the fixed build, boot, probe, bench, teardown sequence against the
/// stack. Only two paths abort the run: a failed image build (before anything
/// is started, so nothing is torn down) and an agent that never turns healthy
/// (logs are dumped and the stack is torn down first). Every later mishap is
/// reported and the run continues, so the operator always gets a full pass.
pub struct WorkflowRunner {
    stack: Arc<StackService>,
    agent: Arc<dyn AgentEndpoint>,
    plan: WorkflowPlan,
}

impl WorkflowRunner {
    pub fn new(stack: Arc<StackService>, agent: Arc<dyn AgentEndpoint>, plan: WorkflowPlan) -> Self {
        Self { stack, agent, plan }
    }

    pub fn run(&self) -> Result<WorkflowReport> {
        println!("🧪 benchbox: assessment stack workflow");

        self.build_images()?;
        self.boot_agent()?;

        let endpoint_healthy = self.probe_health();
        let assessment = self.probe_assess();

        self.run_harness();
        let summary = self.report_results();

        self.stack.down();
        println!("🏁 workflow complete");

        Ok(WorkflowReport {
            endpoint_healthy,
            assessment,
            summary,
        })
    }

    /// Step 1. The one failure with nothing to tear down.
    fn build_images(&self) -> Result<()> {
        println!("[1/5] 🔨 building images...");
        self.stack.build().context("image build failed")?;
        println!("[1/5] ✅ images built");
        Ok(())
    }

    /// Steps 2 and 2b. Start detached, wait the fixed delay, then gate on the
    /// orchestrator's health status. The start itself has no failure path; an
    /// agent that did not come up is caught by the health gate.
    fn boot_agent(&self) -> Result<()> {
        let service = &self.plan.agent_service;

        println!("[2/5] 🚀 starting {service}...");
        if let Err(err) = self.stack.start_detached(service) {
            warn!("start of {service} did not report success: {err:#}");
        }

        debug!("waiting {:?} before the health check", self.plan.startup_wait);
        thread::sleep(self.plan.startup_wait);

        let health = match self.stack.health(service) {
            Ok(health) => health,
            Err(err) => ServiceHealth::Unknown(format!("health inspection failed: {err:#}")),
        };

        if !health.is_healthy() {
            println!("[2/5] ❌ {service} reported '{health}'");
            println!("──── {service} logs ────");
            if let Err(err) = self.stack.dump_logs(service) {
                warn!("could not fetch logs of {service}: {err:#}");
            }
            self.stack.down();
            bail!("service '{service}' never became healthy (status: {health})");
        }

        println!("[2/5] ✅ {service} is healthy");
        Ok(())
    }

    /// Step 3a. Warn-only: a misbehaving /health does not stop the run.
    fn probe_health(&self) -> bool {
        match self.agent.health() {
            Ok(reply) if reply.is_healthy() => {
                println!("[3/5] ✅ GET /health: {}", reply.status);
                true
            }
            Ok(reply) => {
                println!("[3/5] ❌ GET /health returned status '{}'", reply.status);
                false
            }
            Err(err) => {
                println!("[3/5] ❌ GET /health failed: {err:#}");
                false
            }
        }
    }

    /// Step 3b. All three outcomes are non-fatal.
    fn probe_assess(&self) -> AssessOutcome {
        let request = AssessRequest::new(self.plan.task.clone());
        let outcome = self.agent.assess(&request);

        match &outcome {
            AssessOutcome::Passed { sentiment } => {
                println!("[3/5] ✅ POST /assess: sentiment '{sentiment}'");
            }
            AssessOutcome::Rejected { error } => {
                println!("[3/5] ❌ POST /assess rejected: {error}");
            }
            AssessOutcome::Unreachable { message } => {
                println!("[3/5] ❌ POST /assess failed: {message}");
            }
        }

        outcome
    }

    /// Step 4. The harness owns its own exit code; nothing is checked here.
    fn run_harness(&self) {
        let service = &self.plan.harness_service;
        println!("[4/5] 🏃 running {service} to completion...");
        if let Err(err) = self.stack.run_to_exit(service) {
            warn!("run of {service} did not report success: {err:#}");
        }
    }

    /// Steps 5 and 5b.
    fn report_results(&self) -> Option<RunSummary> {
        match load_results(&self.plan.results_path) {
            Ok(Some(document)) => match document.summary() {
                Some(summary) => {
                    println!("[5/5] ✅ accuracy: {}", summary.accuracy_percent());
                    println!("[5/5] ✅ average score: {}", summary.average_display());
                    Some(*summary)
                }
                None => {
                    println!("[5/5] ❌ results file has no entries");
                    None
                }
            },
            Ok(None) => {
                println!(
                    "[5/5] ❌ results file not found at {:?}",
                    self.plan.results_path
                );
                None
            }
            Err(err) => {
                println!("[5/5] ❌ could not read results: {err:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAgent, MockStack};
    use std::fs;

    fn test_plan(results_path: PathBuf) -> WorkflowPlan {
        WorkflowPlan {
            agent_service: "purple-agent".to_string(),
            harness_service: "green-agent".to_string(),
            task: "Assess this: great launch".to_string(),
            startup_wait: Duration::ZERO,
            results_path,
        }
    }

    fn create_runner(
        results_path: PathBuf,
    ) -> (WorkflowRunner, Arc<MockStack>, Arc<MockAgent>) {
        let stack = Arc::new(MockStack::new());
        let agent = Arc::new(MockAgent::new());
        let runner = WorkflowRunner::new(
            Arc::new(StackService::new(stack.clone())),
            agent.clone(),
            test_plan(results_path),
        );
        (runner, stack, agent)
    }

    #[test]
    fn test_full_run_in_order_with_single_teardown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let results_path = temp_dir.path().join("assessment_results.json");
        fs::write(
            &results_path,
            r#"{"results": [{"details": {"summary": {"accuracy": 0.8, "average_score": 0.8333}}}]}"#,
        )
        .unwrap();

        let (runner, stack, _agent) = create_runner(results_path);
        stack.set_health("purple-agent", ServiceHealth::Healthy);

        let report = runner.run().unwrap();

        assert!(report.endpoint_healthy);
        assert_eq!(
            report.assessment,
            AssessOutcome::Passed {
                sentiment: "positive".to_string()
            }
        );
        let summary = report.summary.unwrap();
        assert_eq!(summary.accuracy_percent(), "80%");
        assert_eq!(summary.average_display(), "0.83");

        let commands = stack.commands();
        assert_eq!(
            commands,
            vec![
                "build".to_string(),
                "up_detached:purple-agent".to_string(),
                "health:purple-agent".to_string(),
                "run:green-agent".to_string(),
                "down".to_string(),
            ]
        );
    }

    #[test]
    fn test_build_failure_aborts_before_any_start() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (runner, stack, _agent) = create_runner(temp_dir.path().join("r.json"));
        stack.set_fail_on("build");

        let err = runner.run().unwrap_err();
        assert!(err.to_string().contains("image build failed"));

        let commands = stack.commands();
        assert_eq!(commands, vec!["build".to_string()]);
    }

    #[test]
    fn test_unhealthy_agent_dumps_logs_and_tears_down() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (runner, stack, agent) = create_runner(temp_dir.path().join("r.json"));
        stack.set_health("purple-agent", ServiceHealth::Unhealthy);

        let err = runner.run().unwrap_err();
        assert!(err.to_string().contains("never became healthy"));
        assert!(err.to_string().contains("unhealthy"));

        let commands = stack.commands();
        assert!(commands.contains(&"logs:purple-agent".to_string()));
        assert_eq!(
            commands.iter().filter(|c| *c == &"down".to_string()).count(),
            1
        );
        // The HTTP surface was never touched.
        assert!(agent.commands().is_empty());
    }

    #[test]
    fn test_rejected_assessment_does_not_abort() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (runner, stack, agent) = create_runner(temp_dir.path().join("r.json"));
        stack.set_health("purple-agent", ServiceHealth::Healthy);
        agent.set_assessment(AssessOutcome::Rejected {
            error: "bad input".to_string(),
        });

        let report = runner.run().unwrap();

        assert_eq!(
            report.assessment,
            AssessOutcome::Rejected {
                error: "bad input".to_string()
            }
        );
        // The harness still ran and the stack still came down.
        let commands = stack.commands();
        assert!(commands.contains(&"run:green-agent".to_string()));
        assert!(commands.contains(&"down".to_string()));
    }

    #[test]
    fn test_missing_results_file_still_tears_down() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (runner, stack, _agent) = create_runner(temp_dir.path().join("absent.json"));
        stack.set_health("purple-agent", ServiceHealth::Healthy);

        let report = runner.run().unwrap();

        assert!(report.summary.is_none());
        let commands = stack.commands();
        assert_eq!(
            commands.iter().filter(|c| *c == &"down".to_string()).count(),
            1
        );
    }

    #[test]
    fn test_health_inspection_error_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (runner, stack, _agent) = create_runner(temp_dir.path().join("r.json"));
        stack.set_fail_on("health");

        let err = runner.run().unwrap_err();
        assert!(err.to_string().contains("never became healthy"));

        let commands = stack.commands();
        assert!(commands.contains(&"down".to_string()));
    }
}
