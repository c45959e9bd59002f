use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::ApiError;

/// Races a wire call against the caller's cancellation token.
///
/// The biased order checks the token first, so an already-cancelled token
/// fails before the call is ever issued. Once a call is abandoned its
/// response is dropped unread; it can no longer mutate state.
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}
