//! Outcome of mutating Engine calls
//!
//! Start, stop and remove never fail from the caller's point of view. The
//! HTTP status is folded into an [`OperationResult`] that the view shows as
//! a notice.

use crate::transport::EngineResponse;
use crate::types::short_id;
use crate::EngineError;
use serde::Serialize;

/// Mutating actions the client can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    StartContainer,
    StopContainer,
    RemoveContainer,
    RemoveImage,
}

impl Operation {
    /// Statuses the Engine documents as success for this action
    fn success_statuses(self) -> &'static [u16] {
        match self {
            Self::RemoveImage => &[200, 204],
            _ => &[204],
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::RemoveImage => "Image",
            _ => "Container",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::StartContainer => "start",
            Self::StopContainer => "stop",
            Self::RemoveContainer | Self::RemoveImage => "remove",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::StartContainer => "started",
            Self::StopContainer => "stopped",
            Self::RemoveContainer | Self::RemoveImage => "removed",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.verb(), self.subject().to_lowercase())
    }
}

/// Severity of an operation outcome.
///
/// Engine replies only ever map to `Success` or `Error`; `Warning` is left
/// for notices raised by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationCategory {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What happened when a mutating call was sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub operation: Operation,
    /// HTTP status, `None` if the request never got a reply
    pub status_code: Option<u16>,
    pub status_text: String,
    pub message: String,
    pub category: OperationCategory,
}

impl OperationResult {
    /// Classify an Engine reply
    pub fn from_response(operation: Operation, target: &str, response: &EngineResponse) -> Self {
        let subject = operation.subject();
        let target = short_id(target);

        let (category, message) = if operation.success_statuses().contains(&response.status) {
            (
                OperationCategory::Success,
                format!("{} {} {}", subject, target, operation.past_tense()),
            )
        } else {
            let reason = response
                .engine_message()
                .or_else(|| Some(response.status_text.clone()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| format!("unexpected status {}", response.status));
            (
                OperationCategory::Error,
                format!("Failed to {} {}: {}", operation, target, reason),
            )
        };

        Self {
            operation,
            status_code: Some(response.status),
            status_text: response.status_text.clone(),
            message,
            category,
        }
    }

    /// The request did not reach the Engine
    pub fn transport_failure(operation: Operation, target: &str, error: &EngineError) -> Self {
        Self {
            operation,
            status_code: None,
            status_text: error.to_string(),
            message: format!("Failed to {} {}: {}", operation, short_id(target), error),
            category: OperationCategory::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.category == OperationCategory::Success
    }

    pub fn is_error(&self) -> bool {
        self.category == OperationCategory::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_no_content_is_success() {
        let result = OperationResult::from_response(
            Operation::StopContainer,
            "web",
            &EngineResponse::new(204, ""),
        );
        assert_eq!(result.category, OperationCategory::Success);
        assert_eq!(result.status_code, Some(204));
        assert_eq!(result.message, "Container web stopped");
    }

    #[test]
    fn test_stop_not_found_is_error() {
        let result = OperationResult::from_response(
            Operation::StopContainer,
            "web",
            &EngineResponse::new(404, r#"{"message": "No such container: web"}"#),
        );
        assert_eq!(result.category, OperationCategory::Error);
        assert_eq!(result.status_code, Some(404));
        assert_eq!(result.status_text, "Not Found");
        assert_eq!(result.message, "Failed to stop container web: No such container: web");
    }

    #[test]
    fn test_not_modified_is_error() {
        for operation in [Operation::StartContainer, Operation::StopContainer] {
            let result = OperationResult::from_response(operation, "web", &EngineResponse::new(304, ""));
            assert_eq!(result.category, OperationCategory::Error);
            assert_eq!(result.status_code, Some(304));
            assert_eq!(result.status_text, "Not Modified");
        }
    }

    #[test]
    fn test_remove_image_accepts_ok_and_no_content() {
        for status in [200, 204] {
            let result = OperationResult::from_response(
                Operation::RemoveImage,
                "sha256:ec3f0931a6e6b6855d76b2d7b0be30e81860baccd891b2e243280bf1cd8ad710",
                &EngineResponse::new(status, "[]"),
            );
            assert!(result.is_success(), "status {} should succeed", status);
            assert_eq!(result.message, "Image ec3f0931a6e6 removed");
        }

        let conflict = OperationResult::from_response(
            Operation::RemoveImage,
            "nginx",
            &EngineResponse::new(409, r#"{"message": "image is being used by running container"}"#),
        );
        assert!(conflict.is_error());
        assert_eq!(conflict.status_code, Some(409));
    }

    #[test]
    fn test_remove_container_ok_is_not_success() {
        let result = OperationResult::from_response(
            Operation::RemoveContainer,
            "web",
            &EngineResponse::new(200, ""),
        );
        assert!(result.is_error());
    }

    #[test]
    fn test_transport_failure() {
        let err = EngineError::Connection("connection refused".to_string());
        let result = OperationResult::transport_failure(Operation::StartContainer, "web", &err);
        assert!(result.is_error());
        assert_eq!(result.status_code, None);
        assert_eq!(
            result.message,
            "Failed to start container web: Failed to connect to Docker Engine: connection refused"
        );
    }
}
