//! Elapsed-time readout. The engine owns the clock; while a puzzle is being
//! solved the app polls it once per second and renders whatever comes back.
//! A negative elapsed value is the engine's expiry marker: the display
//! pins to EXPIRED and polling stops.

use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const EXPIRED: &str = "EXPIRED";

#[derive(Debug)]
pub struct SolveTimer {
    display: String,
    expired: bool,
    last_poll: Option<Instant>,
}

impl Default for SolveTimer {
    fn default() -> Self {
        Self {
            display: format_elapsed(0),
            expired: false,
            last_poll: None,
        }
    }
}

impl SolveTimer {
    pub fn display(&self) -> &str {
        &self.display
    }

    /// True at most once per second, and never again once expired.
    pub fn should_poll(&mut self, now: Instant) -> bool {
        if self.expired {
            return false;
        }
        match self.last_poll {
            Some(last) if now.duration_since(last) < POLL_INTERVAL => false,
            _ => {
                self.last_poll = Some(now);
                true
            }
        }
    }

    pub fn apply_elapsed(&mut self, seconds: i64) {
        if seconds < 0 {
            self.display = EXPIRED.to_string();
            self.expired = true;
        } else {
            self.display = format_elapsed(seconds);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
