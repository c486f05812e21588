use serde_json::Value;
use thiserror::Error;

/// All possible error types that may occur while attempting a login
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("{0}")]
    Transport(String),
    #[cfg(feature = "native")]
    #[error("Error performing login request. {0}")]
    Request(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("Login response body cannot be processed. {0}")]
    ResponseBody(#[from] serde_json::Error),
    #[error("Environment Variable error\n{0}")]
    EnvVar(#[from] std::env::VarError),
    #[error("Unsupported locale `{0}`. Expected `ar` or `en`")]
    UnsupportedLocale(String),
    #[error("{0}")]
    Generic(String),
}

impl AuthError {
    /// Build a [Rejected][AuthError::Rejected] error from a non-success response. The message is
    /// the `message` field of a JSON object body, otherwise the body text itself. When the body
    /// is blank the `reason` (usually the status text) is used.
    pub fn rejected(status: u16, body: &str, reason: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        }
        .or_else(|| Some(body.trim().to_owned()).filter(|text| !text.is_empty()))
        .unwrap_or_else(|| reason.to_owned());
        Self::Rejected { status, message }
    }
}

impl From<&str> for AuthError {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_owned())
    }
}

impl From<String> for AuthError {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}

/// Generic [Result][std::result::Result] type where the error is always [AuthError]
pub type AuthResult<T> = std::result::Result<T, AuthError>;
