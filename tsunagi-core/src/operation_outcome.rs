use serde::{Deserialize, Serialize};

use crate::TsunagiError;

/// FHIR OperationOutcome returned for every failed request
/// See: https://www.hl7.org/fhir/operationoutcome.html
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub resource_type: String,
    pub issue: Vec<OperationOutcomeIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcomeIssue {
    pub severity: IssueSeverity,
    pub code: IssueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Fatal,
    Error,
    Warning,
    Information,
}

/// Subset of the FHIR issue-type value set this service emits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Invalid,
    Processing,
    NotSupported,
    NotFound,
    Exception,
    Informational,
}

impl OperationOutcome {
    pub fn new(severity: IssueSeverity, code: IssueType, diagnostics: impl Into<String>) -> Self {
        Self {
            resource_type: "OperationOutcome".to_string(),
            issue: vec![OperationOutcomeIssue {
                severity,
                code,
                diagnostics: Some(diagnostics.into()),
            }],
        }
    }

    pub fn error(code: IssueType, diagnostics: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Error, code, diagnostics)
    }

    /// Operation not allowed on this path (e.g. `_search` on a collection)
    pub fn method_not_allowed(path: &str) -> Self {
        Self::error(
            IssueType::NotSupported,
            format!("Method not allowed for {}", path),
        )
    }

    pub fn issue_code(&self) -> Option<IssueType> {
        self.issue.first().map(|i| i.code)
    }
}

impl From<&TsunagiError> for OperationOutcome {
    fn from(err: &TsunagiError) -> Self {
        let code = match err {
            TsunagiError::NotFound { .. } => IssueType::NotFound,
            TsunagiError::UnprocessableEntity(_) => IssueType::Processing,
            TsunagiError::InvalidJson(_) => IssueType::Invalid,
            TsunagiError::Backend(_) => IssueType::Exception,
        };
        Self::error(code, err.to_string())
    }
}
