use std::time::{Duration, Instant};

/// Auto-resetting periodic tick source on the monotonic clock
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// A running ticker whose first tick is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: Some(now + interval),
        }
    }

    /// (Re)start with a full interval ahead
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Time left before the next tick, `None` when stopped
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Consume a due tick. Missed ticks collapse into one.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                let mut following = next + self.interval;
                if following <= now {
                    following = now + self.interval;
                }
                self.next = Some(following);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Duration = Duration::from_secs(60);

    #[test]
    fn test_ticks_every_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(MIN, t0);
        assert!(!ticker.take_due(t0));
        assert_eq!(ticker.until_due(t0), Some(MIN));
        assert!(ticker.take_due(t0 + MIN));
        assert!(!ticker.take_due(t0 + MIN));
        assert!(ticker.take_due(t0 + MIN * 2));
    }

    #[test]
    fn test_missed_ticks_collapse() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(MIN, t0);
        let late = t0 + MIN * 5 + Duration::from_secs(1);
        assert!(ticker.take_due(late));
        assert!(!ticker.take_due(late));
        assert_eq!(ticker.until_due(late), Some(MIN));
    }

    #[test]
    fn test_stop_and_restart() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(MIN, t0);
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.until_due(t0), None);
        assert!(!ticker.take_due(t0 + MIN * 3));

        let t1 = t0 + MIN * 3;
        ticker.start(t1);
        assert!(ticker.is_running());
        assert!(!ticker.take_due(t1 + Duration::from_secs(59)));
        assert!(ticker.take_due(t1 + MIN));
    }
}
