use thiserror::Error;

#[derive(Error, Debug)]
pub enum JenkinsError {
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed. Check JENKINS_USER and JENKINS_API_TOKEN.")]
    Unauthenticated,

    #[error("Access denied to {0}. The configured user lacks permission.")]
    Forbidden(String),

    #[error("Jenkins API error: {message} (status: {}, code: {code})", describe_status(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
        code: String,
    },
}

pub type Result<T> = std::result::Result<T, JenkinsError>;

fn describe_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

impl JenkinsError {
    /// Normalizes a transport failure. Only the reqwest error kind and its
    /// message are kept; the URL is stripped so no query string leaks out.
    pub fn from_transport(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "TIMEOUT"
        } else if err.is_connect() {
            "CONNECT"
        } else if err.is_decode() {
            "DECODE"
        } else if err.is_status() {
            "HTTP_STATUS"
        } else {
            "REQUEST"
        };

        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.without_url().to_string(),
            code: code.to_string(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
