use showcase_core::{annotate, AnnotatedEntry, CatalogEntry, ContactMessage, Exclusions, Session};
use tokio_util::sync::CancellationToken;

use crate::{
    ApiError, MutationGateway, PortfolioApi, ResourceFetcher, SessionManager, SyncBundle,
};

/// The admin console facade: one value owning the session, the canonical
/// exclusion set and the cached collections, with every operation routed
/// through the components that guard them.
///
/// Invalidation discipline: whenever a call comes back `SessionExpired`
/// (and on [`AdminConsole::logout`]) all three cached collections are
/// cleared, so no partial authenticated state survives.
pub struct AdminConsole<A> {
    api: A,
    sessions: SessionManager,
    fetcher: ResourceFetcher,
    gateway: MutationGateway,
    exclusions: Exclusions,
    catalog: Vec<CatalogEntry>,
    messages: Vec<ContactMessage>,
}

impl<A: PortfolioApi> AdminConsole<A> {
    pub fn new(api: A, include_forks: bool) -> Self {
        Self {
            api,
            sessions: SessionManager::new(),
            fetcher: ResourceFetcher::new(include_forks),
            gateway: MutationGateway::new(),
            exclusions: Exclusions::new(),
            catalog: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Builds a console around a previously issued session token.
    pub fn restore(api: A, include_forks: bool, token: impl Into<String>) -> Self {
        let mut console = Self::new(api, include_forks);
        console.sessions = SessionManager::restore(token);
        console
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.sessions.current_session()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        self.sessions.login(&self.api, username, password).await
    }

    /// Explicit logout: drop the session and every cached collection.
    pub fn logout(&mut self) {
        self.sessions.invalidate();
        self.clear_collections();
    }

    /// Runs a full sync and swaps the fetched collections in. Returns the
    /// non-fatal warnings of the round.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<Vec<String>, ApiError> {
        match self
            .fetcher
            .fetch_all(&self.api, &mut self.sessions, cancel)
            .await
        {
            Ok(SyncBundle {
                exclusions,
                catalog,
                messages,
                warnings,
            }) => {
                self.exclusions.replace(exclusions);
                self.catalog = catalog;
                self.messages = messages;
                Ok(warnings)
            }
            Err(err) => Err(self.absorb_failure(err)),
        }
    }

    pub async fn add_entry(
        &mut self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let result = self
            .gateway
            .add_entry(
                &self.api,
                &mut self.sessions,
                &mut self.exclusions,
                name,
                cancel,
            )
            .await;
        result.map_err(|err| self.absorb_failure(err))
    }

    pub async fn remove_entry(
        &mut self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let result = self
            .gateway
            .remove_entry(
                &self.api,
                &mut self.sessions,
                &mut self.exclusions,
                name,
                cancel,
            )
            .await;
        result.map_err(|err| self.absorb_failure(err))
    }

    /// The catalog snapshot joined with the current exclusion set.
    pub fn annotated(&self) -> Vec<AnnotatedEntry> {
        annotate(&self.catalog, &self.exclusions)
    }

    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    pub fn mutation_pending(&self) -> bool {
        self.gateway.is_pending()
    }

    fn absorb_failure(&mut self, err: ApiError) -> ApiError {
        if matches!(err, ApiError::SessionExpired) {
            self.clear_collections();
        }
        err
    }

    fn clear_collections(&mut self) {
        self.exclusions.clear();
        self.catalog.clear();
        self.messages.clear();
    }
}
