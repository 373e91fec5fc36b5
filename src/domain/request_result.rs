use std::fmt;

use crate::transport::{ErrorCode, TransportError};

/// Outcome status of a feed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Success,
    Failed(ErrorCode),
}

impl RequestStatus {
    /// Numeric status; 0 means success.
    pub fn code(self) -> i32 {
        match self {
            RequestStatus::Success => 0,
            RequestStatus::Failed(code) => code.as_i32(),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What a feed request produced. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    status: RequestStatus,
    diagnostic: String,
    payload: Vec<u8>,
}

impl RequestResult {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: RequestStatus::Success,
            diagnostic: String::new(),
            payload,
        }
    }

    pub fn failure(code: ErrorCode, diagnostic: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Failed(code),
            diagnostic: diagnostic.into(),
            payload: Vec::new(),
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == RequestStatus::Success
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

impl From<TransportError> for RequestResult {
    fn from(err: TransportError) -> Self {
        RequestResult::failure(err.code(), err.diagnostic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_diagnostic() {
        let result = RequestResult::success(b"<rss/>".to_vec());
        assert!(result.is_success());
        assert!(result.diagnostic().is_empty());
        assert_eq!(result.text(), "<rss/>");
    }

    #[test]
    fn test_failure_has_empty_payload() {
        let result = RequestResult::failure(ErrorCode::CouldntResolveHost, "no such host");
        assert!(!result.is_success());
        assert!(result.payload().is_empty());
        assert_eq!(result.status().to_string(), "6");
    }

    #[test]
    fn test_from_transport_error() {
        let result: RequestResult =
            TransportError::new(ErrorCode::WriteError, "short write").into();
        assert_eq!(result.status(), RequestStatus::Failed(ErrorCode::WriteError));
        assert_eq!(result.diagnostic(), "short write");
    }
}
