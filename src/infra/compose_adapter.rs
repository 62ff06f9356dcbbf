use crate::domain::{ComposeRuntime, ServiceHealth};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Shells out to `docker compose` for every stack operation.
#[derive(Debug, Clone)]
pub struct ComposeAdapter {
    compose_file: PathBuf,
}

impl ComposeAdapter {
    pub fn new(compose_file: impl Into<PathBuf>) -> Self {
        Self {
            compose_file: compose_file.into(),
        }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new("docker");
        cmd.arg("compose");
        cmd.arg("-f");
        cmd.arg(&self.compose_file);
        cmd
    }

    fn compose(&self, args: &[&str], context: &str) -> Result<()> {
        let status = self.compose_status(args, context)?;
        ensure_success(status, context)
    }

    fn compose_status(&self, args: &[&str], context: &str) -> Result<ExitStatus> {
        self.base_command()
            .args(args)
            .status()
            .with_context(|| context.to_string())
    }

    fn compose_capture(&self, args: &[&str], context: &str) -> Result<String> {
        let output = self
            .base_command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .with_context(|| context.to_string())?;

        if !output.status.success() {
            bail!("docker compose returned status {:?} ({context})", output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ComposeRuntime for ComposeAdapter {
    fn build_images(&self) -> Result<()> {
        self.compose(&["build"], "building stack images")
    }

    fn start_detached(&self, service: &str) -> Result<()> {
        self.compose(
            &["up", "-d", service],
            &format!("starting {service} detached"),
        )
    }

    fn run_to_exit(&self, service: &str) -> Result<()> {
        // Foreground `up` returns when the container exits. The service owns its
        // exit code; it is not checked here.
        let _ = self.compose_status(&["up", service], &format!("running {service}"))?;
        Ok(())
    }

    fn service_health(&self, service: &str) -> Result<ServiceHealth> {
        let id = self.compose_capture(
            &["ps", "-q", service],
            &format!("resolving container id of {service}"),
        )?;
        let id = id.trim();

        if id.is_empty() {
            return Ok(ServiceHealth::Unknown("no container".to_string()));
        }

        let output = Command::new("docker")
            .args(["inspect", "--format", "{{.State.Health.Status}}", id])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("inspecting health of {service}"))?;

        if !output.status.success() {
            return Ok(ServiceHealth::Unknown("inspect failed".to_string()));
        }

        Ok(ServiceHealth::parse(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn dump_logs(&self, service: &str) -> Result<()> {
        // Inherited stdio, so the logs land on the operator's console.
        let _ = self.compose_status(&["logs", service], &format!("fetching logs of {service}"))?;
        Ok(())
    }

    fn down(&self) -> Result<()> {
        self.compose(&["down"], "tearing down the stack")
    }
}

fn ensure_success(status: ExitStatus, context: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    bail!("docker compose returned status {:?} ({context})", status)
}
