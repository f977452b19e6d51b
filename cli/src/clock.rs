use chrono::prelude::*;
use chrono::TimeDelta;

/// Wall-clock timer for one session, runs from construction until [`GameClock::stop`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameClock {
    started_at: DateTime<Utc>,
    stopped_at: Option<DateTime<Utc>>,
}

impl GameClock {
    pub fn start() -> Self {
        Self::start_at(Utc::now())
    }

    pub fn start_at(now: DateTime<Utc>) -> Self {
        log::debug!("clock started at {}", now);
        Self {
            started_at: now,
            stopped_at: None,
        }
    }

    pub fn stop(&mut self) {
        self.stop_at(Utc::now());
    }

    /// Stopping twice keeps the first stop time.
    pub fn stop_at(&mut self, now: DateTime<Utc>) {
        if self.stopped_at.is_none() {
            log::debug!("clock stopped at {}", now);
            self.stopped_at = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.stopped_at.is_none()
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.elapsed_at(Utc::now())
    }

    pub fn elapsed_at(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.stopped_at.unwrap_or(now) - self.started_at).max(TimeDelta::zero())
    }
}

/// `H:MM:SS`, whole seconds only.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
