use std::fmt;

/// A Jenkins API token. `Debug` is redacted so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// User name plus API token, sent as HTTP Basic auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub token: Token,
}

impl Credentials {
    /// Returns credentials only when both halves are present and non-blank.
    pub fn from_parts(user: Option<&str>, token: Option<&str>) -> Option<Self> {
        let user = user.map(str::trim).filter(|u| !u.is_empty())?;
        let token = token.map(str::trim).filter(|t| !t.is_empty())?;

        Some(Self {
            user: user.to_owned(),
            token: Token::from(token),
        })
    }
}
