//! Wall-clock access for the experiment session.
//!
//! Every timestamp the session writes (task start/end, event times, the
//! experiment span) is read through a [`Clock`], so tests can drive elapsed
//! time by hand with [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;

use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

/// Source of "now" for the session state machine.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// UTC wall clock. Works on wasm through `time`'s `wasm-bindgen` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<OffsetDateTime>>,
}

impl ManualClock {
    pub fn starting_at(start: OffsetDateTime) -> Self {
        Self {
            current: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }

    pub fn advance_ms(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(OffsetDateTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.current.get()
    }
}

/// Seconds between two instants as a float (negative if `end` precedes `start`).
pub fn seconds_between(start: OffsetDateTime, end: OffsetDateTime) -> f64 {
    (end - start).as_seconds_f64()
}

/// RFC 3339 / ISO-8601 rendering used for every exported timestamp.
pub fn iso8601(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.unix_timestamp().to_string())
}

pub fn parse_iso8601(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(datetime!(2024-05-01 10:00 UTC));
        let handle = clock.clone();
        handle.advance_ms(1500);
        assert_eq!(clock.now(), datetime!(2024-05-01 10:00:01.5 UTC));
    }

    #[test]
    fn iso_round_trips() {
        let instant = datetime!(2024-05-01 10:00:02.25 UTC);
        let text = iso8601(instant);
        assert_eq!(parse_iso8601(&text), Some(instant));
    }

    #[test]
    fn seconds_between_is_fractional() {
        let start = datetime!(2024-05-01 10:00 UTC);
        let end = start + Duration::milliseconds(2500);
        assert!((seconds_between(start, end) - 2.5).abs() < 1e-9);
    }
}
