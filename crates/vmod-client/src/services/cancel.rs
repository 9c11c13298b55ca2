//! Discarding results for views that went away

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run `fut` unless `token` fires first.
///
/// `None` means the result is stale and must not be applied. A token that is
/// already cancelled wins even if `fut` is ready.
pub async fn unless_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        out = fut => Some(out),
    }
}
