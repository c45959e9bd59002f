use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

/// In-memory proof of authentication.
///
/// The token is the base64 encoding of `username:password`, replayed
/// verbatim on every authenticated call. A session only exists while its
/// owner considers it valid; invalidation discards the value, token
/// included. Sessions are never persisted beyond the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Encodes a credential pair into a session token.
    pub fn from_credentials(username: &str, password: &str) -> Self {
        Self {
            token: BASE64_STANDARD.encode(format!("{username}:{password}")),
        }
    }

    /// Restores a session from a previously issued token. The token is
    /// trusted until the server answers 401.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The `Authorization` header value for authenticated calls.
    pub fn authorization_value(&self) -> String {
        format!("Basic {}", self.token)
    }
}
