use serde::{Deserialize, Serialize};

/// Body POSTed to the agent's /assess endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessRequest {
    pub task: String,
}

impl AssessRequest {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

/// Wire shape of the /assess reply. `result` is only present on success,
/// `error` only on failure; extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessReply {
    pub success: bool,
    #[serde(default)]
    pub result: Option<AssessResult>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssessResult {
    pub sentiment: String,
}

/// Body of the agent's GET /health reply
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReply {
    pub status: String,
}

impl HealthReply {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// What came back from the assess probe. Transport and decode faults are data
/// here rather than errors: the workflow reports them and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessOutcome {
    /// The agent answered `success=true` with a sentiment judgment
    Passed { sentiment: String },
    /// The agent answered `success=false`
    Rejected { error: String },
    /// The request never produced a decodable reply
    Unreachable { message: String },
}

impl AssessOutcome {
    pub fn from_reply(reply: AssessReply) -> Self {
        if !reply.success {
            return Self::Rejected {
                error: reply
                    .error
                    .unwrap_or_else(|| "no error detail provided".to_string()),
            };
        }

        match reply.result {
            Some(result) => Self::Passed {
                sentiment: result.sentiment,
            },
            None => Self::Rejected {
                error: "reply marked success but carried no result".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_task_field() {
        let request = AssessRequest::new("Assess this: great launch");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"task":"Assess this: great launch"}"#);
    }

    #[test]
    fn test_successful_reply_becomes_passed() {
        let reply: AssessReply = serde_json::from_str(
            r#"{"success": true, "result": {"sentiment": "positive", "confidence": 0.91}}"#,
        )
        .unwrap();

        assert_eq!(
            AssessOutcome::from_reply(reply),
            AssessOutcome::Passed {
                sentiment: "positive".to_string()
            }
        );
    }

    #[test]
    fn test_failed_reply_keeps_error_verbatim() {
        let reply: AssessReply =
            serde_json::from_str(r#"{"success": false, "error": "bad input"}"#).unwrap();

        assert_eq!(
            AssessOutcome::from_reply(reply),
            AssessOutcome::Rejected {
                error: "bad input".to_string()
            }
        );
    }

    #[test]
    fn test_success_without_result_is_rejected() {
        let reply: AssessReply = serde_json::from_str(r#"{"success": true}"#).unwrap();

        let outcome = AssessOutcome::from_reply(reply);
        assert!(matches!(outcome, AssessOutcome::Rejected { .. }));
    }

    #[test]
    fn test_health_reply_compares_against_healthy_literal() {
        let reply: HealthReply = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(reply.is_healthy());

        let reply: HealthReply = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!reply.is_healthy());
    }
}
