use crate::domain::{ComposeRuntime, ServiceHealth};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StackService {
    runtime: Arc<dyn ComposeRuntime>,
}

impl StackService {
    pub fn new(runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self { runtime }
    }

    pub fn build(&self) -> Result<()> {
        debug!("building stack images");
        self.runtime.build_images()
    }

    pub fn start_detached(&self, service: &str) -> Result<()> {
        debug!("starting {service} detached");
        self.runtime.start_detached(service)
    }

    pub fn run_to_exit(&self, service: &str) -> Result<()> {
        debug!("running {service} to completion");
        self.runtime.run_to_exit(service)
    }

    pub fn health(&self, service: &str) -> Result<ServiceHealth> {
        self.runtime.service_health(service)
    }

    pub fn dump_logs(&self, service: &str) -> Result<()> {
        self.runtime.dump_logs(service)
    }

    /// Teardown never fails the caller; a half-down stack is reported, not fatal.
    pub fn down(&self) {
        if let Err(err) = self.runtime.down() {
            warn!("teardown did not complete cleanly: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStack;

    #[test]
    fn test_down_absorbs_runtime_failure() {
        let mock = Arc::new(MockStack::new());
        mock.set_fail_on("down");

        let service = StackService::new(mock.clone());
        service.down();

        assert!(mock.commands().contains(&"down".to_string()));
    }

    #[test]
    fn test_health_passes_through() {
        let mock = Arc::new(MockStack::new());
        mock.set_health("purple-agent", ServiceHealth::Starting);

        let service = StackService::new(mock.clone());
        let health = service.health("purple-agent").unwrap();

        assert_eq!(health, ServiceHealth::Starting);
        assert!(
            mock.commands()
                .contains(&"health:purple-agent".to_string())
        );
    }
}
