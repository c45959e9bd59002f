use console_logging::{console_debug, console_warn};
use showcase_core::{CatalogEntry, ContactMessage};
use tokio_util::sync::CancellationToken;

use crate::cancel::guarded;
use crate::{ApiError, PortfolioApi, SessionManager};

/// Everything one sync round brings back.
///
/// `warnings` carries non-fatal collection failures; the bundle is still
/// usable when it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncBundle {
    pub exclusions: Vec<String>,
    pub catalog: Vec<CatalogEntry>,
    pub messages: Vec<ContactMessage>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    include_forks: bool,
}

impl ResourceFetcher {
    pub fn new(include_forks: bool) -> Self {
        Self { include_forks }
    }

    /// Fetches the three admin collections under the given session.
    ///
    /// The exclusion-set fetch resolves first: a 401 there invalidates the
    /// session and fails the whole call, nothing downstream is trusted. The
    /// catalog needs no session but a failure there is fatal to the sync. A
    /// message-log failure other than 401 degrades to an empty log plus a
    /// warning so exclusions and catalog still land.
    pub async fn fetch_all(
        &self,
        api: &dyn PortfolioApi,
        sessions: &mut SessionManager,
        cancel: &CancellationToken,
    ) -> Result<SyncBundle, ApiError> {
        let auth = sessions.authorization_header()?;

        let exclusions = match guarded(cancel, api.fetch_exclusions(&auth)).await {
            Ok(names) => names,
            Err(ApiError::SessionExpired) => {
                sessions.invalidate();
                return Err(ApiError::SessionExpired);
            }
            Err(err) => return Err(err),
        };

        let catalog = guarded(cancel, api.fetch_catalog(self.include_forks)).await?;

        let mut warnings = Vec::new();
        let messages = match guarded(cancel, api.fetch_messages(&auth)).await {
            Ok(messages) => messages,
            // The exclusion fetch above vetted the session; a 401 on the
            // message log at this point carries no new information.
            Err(ApiError::SessionExpired) => Vec::new(),
            Err(ApiError::Cancelled) => return Err(ApiError::Cancelled),
            Err(err) => {
                console_warn!("contact messages unavailable: {err}");
                warnings.push(format!("contact messages unavailable: {err}"));
                Vec::new()
            }
        };

        console_debug!(
            "sync complete: {} excluded, {} catalog entries, {} messages",
            exclusions.len(),
            catalog.len(),
            messages.len()
        );
        Ok(SyncBundle {
            exclusions,
            catalog,
            messages,
            warnings,
        })
    }
}
