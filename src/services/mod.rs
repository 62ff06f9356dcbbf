pub mod stack_service;
pub mod workflow;

pub use stack_service::StackService;
pub use workflow::{WorkflowPlan, WorkflowReport, WorkflowRunner};
