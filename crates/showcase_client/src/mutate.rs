use std::sync::atomic::{AtomicBool, Ordering};

use console_logging::console_info;
use showcase_core::Exclusions;
use tokio_util::sync::CancellationToken;

use crate::cancel::guarded;
use crate::{ApiError, PortfolioApi, SessionManager};

/// Serializes exclusion-set changes: at most one mutation in flight.
///
/// The canonical set is written only after the server acknowledges, so a
/// failed mutation needs no rollback. A 401 cascades into session
/// invalidation.
#[derive(Debug, Default)]
pub struct MutationGateway {
    pending: AtomicBool,
}

/// Clears the in-flight flag when the mutation resolves, on every path.
struct FlightPermit<'a>(&'a AtomicBool);

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MutationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Adds `name` to the exclusion set.
    ///
    /// An empty or whitespace-only name is rejected locally, without a
    /// wire call. The local set is updated only after acknowledgment; the
    /// returned string is the server's confirmation message.
    pub async fn add_entry(
        &self,
        api: &dyn PortfolioApi,
        sessions: &mut SessionManager,
        exclusions: &mut Exclusions,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let name = validated_name(name)?;
        let _permit = self.acquire()?;

        let auth = sessions.authorization_header()?;
        match guarded(cancel, api.add_exclusion(&auth, name)).await {
            Ok(message) => {
                exclusions.apply_add(name);
                console_info!("excluded {name}");
                Ok(message)
            }
            Err(err) => Err(cascade(sessions, err)),
        }
    }

    /// Removes `name` from the exclusion set. Symmetric to
    /// [`MutationGateway::add_entry`].
    pub async fn remove_entry(
        &self,
        api: &dyn PortfolioApi,
        sessions: &mut SessionManager,
        exclusions: &mut Exclusions,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ApiError> {
        let name = validated_name(name)?;
        let _permit = self.acquire()?;

        let auth = sessions.authorization_header()?;
        match guarded(cancel, api.remove_exclusion(&auth, name)).await {
            Ok(message) => {
                exclusions.apply_remove(name);
                console_info!("no longer excluding {name}");
                Ok(message)
            }
            Err(err) => Err(cascade(sessions, err)),
        }
    }

    fn acquire(&self) -> Result<FlightPermit<'_>, ApiError> {
        if self.pending.swap(true, Ordering::AcqRel) {
            return Err(ApiError::MutationPending);
        }
        Ok(FlightPermit(&self.pending))
    }
}

fn validated_name(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("a project name is required".into()));
    }
    Ok(name)
}

fn cascade(sessions: &mut SessionManager, err: ApiError) -> ApiError {
    if matches!(err, ApiError::SessionExpired) {
        sessions.invalidate();
    }
    err
}
