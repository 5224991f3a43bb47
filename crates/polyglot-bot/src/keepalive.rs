use std::time::Duration;
use tokio::sync::watch;

/// Budget for one ping round-trip.
const PING_TIMEOUT: Duration = Duration::from_secs(8);
/// Wall-clock gap between pings.
const PING_INTERVAL: Duration = Duration::from_secs(300);

/// Periodically GET `url` to keep the hosting platform from idling the
/// service out. Runs until the `shutdown` watch flips to `true` (or its
/// sender is dropped). Ping failures are logged and never fatal.
pub async fn run_keep_alive(url: String, mut shutdown: watch::Receiver<bool>) {
    let client = reqwest::Client::builder()
        .timeout(PING_TIMEOUT)
        .build()
        .expect("Failed to build reqwest client");

    tracing::info!(url = %url, interval = ?PING_INTERVAL, "Keep-alive loop started");

    loop {
        if *shutdown.borrow() {
            break;
        }

        match client.get(&url).send().await {
            Ok(resp) => tracing::debug!(status = %resp.status(), "Keep-alive ping"),
            Err(e) => tracing::warn!(error = %e, "Keep-alive ping failed"),
        }

        tokio::select! {
            _ = tokio::time::sleep(PING_INTERVAL) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("Keep-alive loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn already_signalled_shutdown_exits_without_pinging() {
        let (tx, rx) = watch::channel(true);
        // An unroutable URL: reaching the network here would hang or error,
        // but the loop must exit before its first ping.
        let task = run_keep_alive("http://127.0.0.1:1/".to_string(), rx);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("loop must exit promptly");
        drop(tx);
    }

    #[tokio::test]
    async fn shutdown_signal_ends_the_loop() {
        let (tx, rx) = watch::channel(false);
        // First ping fails fast (connection refused), then the loop parks
        // in its sleep until the signal lands.
        let handle = tokio::spawn(run_keep_alive("http://127.0.0.1:1/".to_string(), rx));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).expect("receiver alive");
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("loop must exit after shutdown")
            .expect("loop must not panic");
    }
}
