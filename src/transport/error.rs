use std::fmt;

use thiserror::Error;

/// Transport status codes. The numeric values are stable and are what the
/// tool reports to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    UnsupportedProtocol = 1,
    FailedInit = 2,
    UrlMalformat = 3,
    CouldntResolveHost = 6,
    CouldntConnect = 7,
    WriteError = 23,
    OutOfMemory = 27,
    OperationTimedout = 28,
    SslConnectError = 35,
    BadFunctionArgument = 43,
    TooManyRedirects = 47,
    SendError = 55,
    RecvError = 56,
    PeerFailedVerification = 60,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Human-readable text for the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedProtocol => "Unsupported protocol",
            ErrorCode::FailedInit => "Failed initialization",
            ErrorCode::UrlMalformat => "URL using bad/illegal format or missing URL",
            ErrorCode::CouldntResolveHost => "Couldn't resolve host name",
            ErrorCode::CouldntConnect => "Couldn't connect to server",
            ErrorCode::WriteError => "Failed writing received data to disk/application",
            ErrorCode::OutOfMemory => "Out of memory",
            ErrorCode::OperationTimedout => "Timeout was reached",
            ErrorCode::SslConnectError => "SSL connect error",
            ErrorCode::BadFunctionArgument => "A libcurl function was given a bad argument",
            ErrorCode::TooManyRedirects => "Number of redirects hit maximum amount",
            ErrorCode::SendError => "Failed sending data to the peer",
            ErrorCode::RecvError => "Failure when receiving data from the peer",
            ErrorCode::PeerFailedVerification => {
                "SSL peer certificate or SSH remote key was not OK"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The single error type raised by a [`Session`](super::Session).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport error {}: {diagnostic}", .code.as_i32())]
pub struct TransportError {
    code: ErrorCode,
    diagnostic: String,
}

impl TransportError {
    pub fn new(code: ErrorCode, diagnostic: impl Into<String>) -> Self {
        Self {
            code,
            diagnostic: diagnostic.into(),
        }
    }

    /// Error whose diagnostic is the code's own description.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.description())
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}
