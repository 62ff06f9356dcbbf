use crate::infra::ComposeAdapter;
use crate::infra::config::{BenchConfig, load_config};
use crate::services::StackService;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::Path;
use std::sync::Arc;

#[derive(Args)]
pub struct StackCommand {
    #[command(subcommand)]
    pub command: StackAction,
}

#[derive(Subcommand)]
pub enum StackAction {
    /// Build all images in the stack
    Build,
    /// Start the agent service detached
    Up,
    /// Tear down the whole stack
    Down,
    /// Show the agent's container health status
    Status,
    /// Dump logs of one service (default: the agent)
    Logs { service: Option<String> },
}

struct Stack {
    config: BenchConfig,
    service: StackService,
}

impl Stack {
    fn new(config_dir: &Path) -> Result<Self> {
        let config = load_config(config_dir)?;
        let compose = Arc::new(ComposeAdapter::new(config.compose_file(config_dir)));
        let service = StackService::new(compose);
        Ok(Self { config, service })
    }

    fn status(&self) -> Result<()> {
        let name = &self.config.agent.service;
        let health = self.service.health(name)?;
        println!("📦 {:<14} | {}", name, health);
        Ok(())
    }
}

pub fn run(cmd: StackCommand, config_dir: &Path) -> Result<()> {
    let stack = Stack::new(config_dir)?;

    match cmd.command {
        StackAction::Build => stack.service.build(),
        StackAction::Up => stack.service.start_detached(&stack.config.agent.service),
        StackAction::Down => {
            stack.service.down();
            println!("✅ stack stopped");
            Ok(())
        }
        StackAction::Status => stack.status(),
        StackAction::Logs { service } => {
            let name = service.unwrap_or_else(|| stack.config.agent.service.clone());
            stack.service.dump_logs(&name)
        }
    }
}
