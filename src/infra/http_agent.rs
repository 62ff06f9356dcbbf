use crate::domain::{AgentEndpoint, AssessOutcome, AssessReply, AssessRequest, HealthReply};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
// The agent runs a model behind /assess; give it room before declaring it gone.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking client for the agent's HTTP surface.
#[derive(Debug)]
pub struct HttpAgentClient {
    client: Client,
    base_url: String,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl AgentEndpoint for HttpAgentClient {
    fn health(&self) -> Result<HealthReply> {
        let url = self.url("/health");

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("GET {url}"))?;

        response
            .json()
            .with_context(|| format!("decoding reply from {url}"))
    }

    fn assess(&self, request: &AssessRequest) -> AssessOutcome {
        let url = self.url("/assess");

        let response = match self.client.post(&url).json(request).send() {
            Ok(response) => response,
            Err(err) => {
                return AssessOutcome::Unreachable {
                    message: format!("POST {url}: {err}"),
                };
            }
        };

        match response.json::<AssessReply>() {
            Ok(reply) => AssessOutcome::from_reply(reply),
            Err(err) => AssessOutcome::Unreachable {
                message: format!("undecodable reply from {url}: {err}"),
            },
        }
    }
}
