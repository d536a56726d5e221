use std::time::{Duration, Instant};

/// Polled from the UI loop; builds a message once every `interval` while running.
pub(crate) struct Ticker<T> {
    interval: Duration,
    last_tick: Option<Instant>,
    message_builder: fn(Instant) -> T,
}

impl<T> Ticker<T> {
    pub(crate) fn new(interval: Duration, message_builder: fn(Instant) -> T) -> Self {
        Self {
            interval,
            last_tick: None,
            message_builder,
        }
    }

    pub(crate) fn start(&mut self, instant: Instant) {
        self.last_tick = Some(instant);
    }

    pub(crate) fn stop(&mut self) {
        self.last_tick = None;
    }

    pub(crate) fn poll(&mut self, instant: Instant) -> Option<T> {
        let last_tick = self.last_tick?;
        if instant.saturating_duration_since(last_tick) < self.interval {
            return None;
        }

        self.last_tick = Some(instant);
        Some((self.message_builder)(instant))
    }

    /// How long the UI can sleep before the next `poll` is worth doing.
    pub(crate) fn time_until_next(&self, instant: Instant) -> Option<Duration> {
        let last_tick = self.last_tick?;
        Some(
            self.interval
                .saturating_sub(instant.saturating_duration_since(last_tick)),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    #[derive(Debug, PartialEq)]
    struct Tick;

    fn ticker() -> Ticker<Tick> {
        Ticker::new(Duration::from_millis(1000), |_| Tick)
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let mut ticker = ticker();
        let now = Instant::now();
        assert_eq!(ticker.poll(now + Duration::from_secs(10)), None);
        assert_eq!(ticker.time_until_next(now), None);
    }

    #[test]
    fn fires_after_interval() {
        let mut ticker = ticker();
        let start = Instant::now();
        ticker.start(start);

        assert_eq!(ticker.poll(start + Duration::from_millis(999)), None);
        assert_eq!(ticker.poll(start + Duration::from_millis(1000)), Some(Tick));
        // Interval restarts from the last tick
        assert_eq!(ticker.poll(start + Duration::from_millis(1500)), None);
        assert_eq!(ticker.poll(start + Duration::from_millis(2000)), Some(Tick));
    }

    #[test]
    fn stop_halts_ticks() {
        let mut ticker = ticker();
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();

        assert_eq!(ticker.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn time_until_next_counts_down() {
        let mut ticker = ticker();
        let start = Instant::now();
        ticker.start(start);

        assert_eq!(
            ticker.time_until_next(start + Duration::from_millis(300)),
            Some(Duration::from_millis(700))
        );
        assert_eq!(
            ticker.time_until_next(start + Duration::from_secs(3)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn message_builder_sees_instant() {
        let mut ticker = Ticker::new(Duration::from_millis(10), |instant| instant);
        let start = Instant::now();
        ticker.start(start);
        let later = start + Duration::from_millis(20);

        assert_eq!(ticker.poll(later), Some(later));
    }
}
