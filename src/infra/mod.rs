pub mod compose_adapter;
pub mod config;
pub mod http_agent;
pub mod results;

pub use compose_adapter::ComposeAdapter;
pub use http_agent::HttpAgentClient;
