use thiserror::Error;

/// Failure taxonomy for every call the client makes.
///
/// `Auth` and `SessionExpired` always cascade into session invalidation;
/// the remaining variants leave session and collections untouched. No call
/// retries on its own, a failed operation is re-triggered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The login endpoint rejected the credential pair.
    #[error("login rejected: {0}")]
    Auth(String),
    /// A previously accepted session was answered with 401.
    #[error("session expired, log in again")]
    SessionExpired,
    /// An authenticated call was attempted without a session.
    #[error("no active session")]
    NoSession,
    /// The server (or a local pre-check) rejected a mutation payload.
    #[error("{0}")]
    Validation(String),
    /// A second mutation was attempted while one is still in flight.
    #[error("another change is still in flight")]
    MutationPending,
    /// The caller cancelled the operation before it completed.
    #[error("operation cancelled")]
    Cancelled,
    /// Transport failure or an unexpected status, unrelated to authorization.
    #[error("network error: {0}")]
    Network(String),
}
