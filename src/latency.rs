use std::time::Duration;

/// Completes with `value` unchanged after suspending for `delay`.
///
/// Every mock operation resolves through this wrapper so callers observe a
/// bounded, non-zero round trip just like against the real backend. There is
/// no cancellation; once issued the delay always runs to completion.
pub async fn after<T>(value: T, delay: Duration) -> T {
    tokio::time::sleep(delay).await;
    value
}

#[cfg(test)]
mod tests {
    use super::after;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn after_waits_for_the_given_delay() {
        let started = tokio::time::Instant::now();
        let value = after(7u32, Duration::from_millis(250)).await;
        assert_eq!(value, 7);
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_completes_without_advancing_time() {
        let started = tokio::time::Instant::now();
        let value = after("now", Duration::ZERO).await;
        assert_eq!(value, "now");
        assert!(started.elapsed() < Duration::from_millis(1));
    }
}
