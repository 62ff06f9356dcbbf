use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from benchbox.toml. Every field has a default, so a
/// missing file yields a fully working config for the standard stack layout.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    pub stack: StackSection,
    pub agent: AgentSection,
    pub harness: HarnessSection,
    pub results: ResultsSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackSection {
    /// Compose file, resolved against the config dir when relative
    pub compose_file: String,
    /// Fixed delay between starting the agent and checking its health ("Ns"/"Nm")
    pub startup_wait: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSection {
    /// Compose service name of the assessment agent
    pub service: String,
    pub base_url: String,
    /// Task sent in the smoke assessment
    pub task: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarnessSection {
    /// Compose service name of the batch harness
    pub service: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResultsSection {
    /// Results file written by the harness; tilde-expanded, resolved against
    /// the config dir when relative
    pub path: String,
}

impl Default for StackSection {
    fn default() -> Self {
        Self {
            compose_file: "docker-compose.yml".to_string(),
            startup_wait: "10s".to_string(),
        }
    }
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            service: "purple-agent".to_string(),
            base_url: "http://localhost:8000".to_string(),
            task: "Assess the sentiment of this statement: the rollout went smoothly."
                .to_string(),
        }
    }
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            service: "green-agent".to_string(),
        }
    }
}

impl Default for ResultsSection {
    fn default() -> Self {
        Self {
            path: "data/assessment_results.json".to_string(),
        }
    }
}

impl BenchConfig {
    pub fn startup_wait(&self) -> Duration {
        parse_duration(&self.stack.startup_wait).unwrap_or(Duration::from_secs(10))
    }

    pub fn compose_file(&self, config_dir: &Path) -> PathBuf {
        resolve(&self.stack.compose_file, config_dir)
    }

    pub fn results_path(&self, config_dir: &Path) -> PathBuf {
        resolve(&self.results.path, config_dir)
    }
}

pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("benchbox.toml")
}

pub fn load_config(config_dir: &Path) -> Result<BenchConfig> {
    let path = config_path(config_dir);

    if !path.exists() {
        return Ok(BenchConfig::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
    parse_config(&content, &path)
}

fn parse_config(content: &str, path: &Path) -> Result<BenchConfig> {
    let config: BenchConfig =
        toml::from_str(content).with_context(|| format!("parse of {:?}", path))?;

    if config.agent.service.trim().is_empty() {
        bail!("[agent] in {:?} has an empty 'service'", path);
    }

    if config.harness.service.trim().is_empty() {
        bail!("[harness] in {:?} has an empty 'service'", path);
    }

    if config.agent.base_url.trim().is_empty() {
        bail!("[agent] in {:?} has an empty 'base_url'", path);
    }

    parse_duration(&config.stack.startup_wait).with_context(|| {
        format!(
            "[stack] in {:?} has an invalid 'startup_wait' ('{}')",
            path, config.stack.startup_wait
        )
    })?;

    Ok(config)
}

pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(stripped) = s.strip_suffix("ms") {
        let millis: u64 = stripped.parse()?;
        Ok(Duration::from_millis(millis))
    } else if let Some(stripped) = s.strip_suffix('s') {
        let secs: u64 = stripped.parse()?;
        Ok(Duration::from_secs(secs))
    } else if let Some(stripped) = s.strip_suffix('m') {
        let mins: u64 = stripped.parse()?;
        Ok(Duration::from_secs(mins * 60))
    } else {
        Err(anyhow::anyhow!("invalid duration format: {}", s))
    }
}

fn resolve(raw: &str, config_dir: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(raw).into_owned();
    let path = PathBuf::from(expanded);

    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}
