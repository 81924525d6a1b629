use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the task API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS, body read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response carrying a list of validation messages.
    #[error("{}", .errors.join(", "))]
    Rejected { status: StatusCode, errors: Vec<String> },

    /// Any other non-2xx response.
    #[error("{}", status_text(.status, .detail.as_deref()))]
    Status { status: StatusCode, detail: Option<String> },

    /// 2xx response whose body did not decode.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

fn status_text(status: &StatusCode, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("request failed with status {} ({})", status.as_u16(), detail),
        None => format!("request failed with status {}", status.as_u16()),
    }
}

impl ApiError {
    /// Server-side validation messages, if this is a validation rejection.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            ApiError::Rejected { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
