// Shared helpers for paused-clock tests.

use std::time::Duration;

use tokio::time::Instant;

/// Paused time advances in whole timer ticks; allow one tick of slack.
pub(crate) fn assert_waited(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(1),
        "waited {elapsed:?}, expected {expected:?}"
    );
}
