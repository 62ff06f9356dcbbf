use serde::Deserialize;

/// Results document written by the harness after a batch run. Only the first
/// entry's summary is reported; extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsDocument {
    #[serde(default)]
    pub results: Vec<RunResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunResult {
    pub details: RunDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunDetails {
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RunSummary {
    /// Fraction in 0..=1
    pub accuracy: f64,
    pub average_score: f64,
}

impl ResultsDocument {
    pub fn summary(&self) -> Option<&RunSummary> {
        self.results.first().map(|run| &run.details.summary)
    }
}

impl RunSummary {
    /// Accuracy fraction rendered as a whole percentage ("0.8" -> "80%")
    pub fn accuracy_percent(&self) -> String {
        format!("{:.0}%", self.accuracy * 100.0)
    }

    /// Average score rounded to two decimal places
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_harness_document() {
        let json = r#"{
            "results": [
                {
                    "details": {
                        "summary": {
                            "accuracy": 0.8,
                            "average_score": 0.8333,
                            "total_cases": 25
                        },
                        "by_category": {}
                    }
                }
            ]
        }"#;

        let document: ResultsDocument = serde_json::from_str(json).unwrap();
        let summary = document.summary().unwrap();
        assert_eq!(summary.accuracy, 0.8);
        assert_eq!(summary.average_score, 0.8333);
    }

    #[test]
    fn test_empty_results_has_no_summary() {
        let document: ResultsDocument = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(document.summary().is_none());
    }

    #[test]
    fn test_accuracy_renders_as_percentage() {
        let summary = RunSummary {
            accuracy: 0.8,
            average_score: 0.8333,
        };
        assert_eq!(summary.accuracy_percent(), "80%");
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let summary = RunSummary {
            accuracy: 1.0,
            average_score: 0.8333,
        };
        assert_eq!(summary.average_display(), "0.83");

        let summary = RunSummary {
            accuracy: 1.0,
            average_score: 0.875,
        };
        assert_eq!(summary.average_display(), "0.88");
    }
}
