use crate::domain::{AgentEndpoint, ComposeRuntime};
use crate::infra::config::{BenchConfig, load_config};
use crate::infra::{ComposeAdapter, HttpAgentClient};
use crate::services::{StackService, WorkflowPlan, WorkflowRunner};
use anyhow::Result;
use clap::Args;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args)]
pub struct RunOptions {
    /// Override the assessment task sent to the agent
    #[arg(long)]
    pub task: Option<String>,

    /// Skip the fixed startup wait (useful when the stack is already warm)
    #[arg(long)]
    pub no_wait: bool,
}

pub fn run(options: RunOptions, config_dir: &Path) -> Result<()> {
    let config = load_config(config_dir)?;
    let compose = Arc::new(ComposeAdapter::new(config.compose_file(config_dir)));
    let agent = Arc::new(HttpAgentClient::new(&config.agent.base_url)?);

    let runner = build_runner(compose, agent, &config, config_dir, options);
    runner.run().map(|_| ())
}

/// Wires a runner from parts. Exposed so tests can swap in mock runtimes.
pub fn build_runner(
    compose: Arc<dyn ComposeRuntime>,
    agent: Arc<dyn AgentEndpoint>,
    config: &BenchConfig,
    config_dir: &Path,
    options: RunOptions,
) -> WorkflowRunner {
    let mut plan = WorkflowPlan {
        agent_service: config.agent.service.clone(),
        harness_service: config.harness.service.clone(),
        task: config.agent.task.clone(),
        startup_wait: config.startup_wait(),
        results_path: config.results_path(config_dir),
    };

    if let Some(task) = options.task {
        plan.task = task;
    }

    if options.no_wait {
        plan.startup_wait = Duration::ZERO;
    }

    let stack = Arc::new(StackService::new(compose));
    WorkflowRunner::new(stack, agent, plan)
}
