use std::time::Duration;

use tracing::debug;

/// Suspends the calling task for `duration_ms` milliseconds.
///
/// Zero returns immediately. Only the current task sleeps; the runtime keeps
/// serving other requests.
pub async fn delay(duration_ms: u64) {
    if duration_ms == 0 {
        return;
    }
    debug!("holding response for {duration_ms}ms");
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
}
