use console_logging::{console_debug, console_info};
use showcase_core::Session;

use crate::{ApiError, PortfolioApi};

/// Sole owner of the credential session.
///
/// Nothing else holds or writes session state; dependents receive the
/// authorization value on demand and report 401s back here through
/// [`SessionManager::invalidate`].
#[derive(Debug, Default)]
pub struct SessionManager {
    session: Option<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a previously issued token. The token is treated as valid
    /// until a server answers 401; there is no upfront validation call.
    pub fn restore(token: impl Into<String>) -> Self {
        Self {
            session: Some(Session::from_token(token)),
        }
    }

    /// Sends the credential pair to the login endpoint and, on acceptance,
    /// establishes a session encoding that pair. No retry on rejection.
    pub async fn login(
        &mut self,
        api: &dyn PortfolioApi,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        api.login(username, password).await?;
        self.session = Some(Session::from_credentials(username, password));
        console_debug!("session established for {username}");
        Ok(())
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Discards the session, token included. Idempotent; this is the
    /// single authority for the logged-out state.
    pub fn invalidate(&mut self) {
        if self.session.take().is_some() {
            console_info!("session invalidated");
        }
    }

    /// The `Authorization` value for the current session.
    pub fn authorization_header(&self) -> Result<String, ApiError> {
        self.session
            .as_ref()
            .map(Session::authorization_value)
            .ok_or(ApiError::NoSession)
    }
}
