pub mod assessment;
pub mod results;
pub mod traits;

pub use assessment::{AssessOutcome, AssessReply, AssessRequest, AssessResult, HealthReply};
pub use results::{ResultsDocument, RunSummary};
pub use traits::{AgentEndpoint, ComposeRuntime, ServiceHealth};
