// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Spaces outgoing requests at least `min_interval` apart.
///
/// MusicBrainz allows one request per second per client. Callers queue on the
/// mutex, so requests from concurrent resolutions are serialized too.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    min_interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Wait for the next free request slot and reserve it.
    pub async fn wait_turn(&self) {
        let mut next_slot = self.next_slot.lock().await;

        if let Some(slot) = *next_slot {
            if slot > Instant::now() {
                tracing::trace!(
                    target: "musicbrainz",
                    wait = ?(slot - Instant::now()),
                    "throttling request"
                );
                sleep_until(slot).await;
            }
        }

        *next_slot = Some(Instant::now() + self.min_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let throttle = RequestThrottle::new(Duration::from_secs(1));
        let start = Instant::now();
        throttle.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_requests_are_spaced_by_interval() {
        let throttle = RequestThrottle::new(Duration::from_millis(250));
        let start = Instant::now();

        for _ in 0..3 {
            throttle.wait_turn().await;
        }

        assert!(
            start.elapsed() >= Duration::from_millis(500),
            "expected >= 500ms, got {:?}",
            start.elapsed()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_never_waits() {
        let throttle = RequestThrottle::new(Duration::ZERO);
        let start = Instant::now();
        throttle.wait_turn().await;
        throttle.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
