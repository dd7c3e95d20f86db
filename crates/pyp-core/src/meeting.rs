//! Group meeting tools
//!
//! Agendas, a countdown timer and a talking-stick queue for circle meetings.
//! None of this is persisted.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// One timed part of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub name: &'static str,
    pub minutes: u32,
}

/// A named meeting plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agenda {
    /// Lookup key, e.g. `60min`
    pub key: &'static str,
    pub title: &'static str,
    pub segments: &'static [Segment],
}

impl Agenda {
    /// Total planned minutes
    pub fn total_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.minutes).sum()
    }
}

const fn segment(name: &'static str, minutes: u32) -> Segment {
    Segment { name, minutes }
}

pub static AGENDAS: [Agenda; 2] = [
    Agenda {
        key: "60min",
        title: "60-Minute Circle",
        segments: &[
            segment("Opening & Centering", 5),
            segment("Check-in Round", 15),
            segment("Practice/Teaching", 20),
            segment("Sharing & Discussion", 15),
            segment("Closing Ritual", 5),
        ],
    },
    Agenda {
        key: "90min",
        title: "90-Minute Deep Dive",
        segments: &[
            segment("Opening & Centering", 10),
            segment("Check-in Round", 20),
            segment("Practice/Teaching", 30),
            segment("Sharing & Discussion", 20),
            segment("Closing Ritual", 10),
        ],
    },
];

/// Suggestions for ending a circle
pub const CLOSING_RITUALS: [&str; 5] = [
    "Share one word describing your state right now",
    "Take three breaths together in silence",
    "Each person shares one gratitude",
    "Hold hands and share a moment of silence",
    "Read a closing poem or quote together",
];

/// Look up an agenda by key
pub fn agenda(key: &str) -> Option<&'static Agenda> {
    AGENDAS.iter().find(|a| a.key.eq_ignore_ascii_case(key.trim()))
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already finished; nothing changed
    Idle,
    /// One second counted down, time remains
    Running,
    /// Reached zero on this tick
    Finished,
}

/// Countdown timer counted in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    /// Full length in seconds
    pub duration: u64,
    /// Seconds left
    pub remaining: u64,
    pub running: bool,
}

impl Countdown {
    /// Length of one tick
    pub const TICK: Duration = Duration::from_secs(1);

    /// A running countdown of `minutes`
    pub fn start(minutes: u32) -> Self {
        let seconds = u64::from(minutes) * 60;
        Self {
            duration: seconds,
            remaining: seconds,
            running: seconds > 0,
        }
    }

    /// Count down one second
    ///
    /// Reports `Finished` exactly once, then stops running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining == 0 {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Running
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if self.remaining > 0 {
            self.running = true;
        }
    }

    /// Pause a running countdown, resume a paused one
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Back to the full duration, stopped
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
    }

    pub fn is_finished(&self) -> bool {
        self.duration > 0 && self.remaining == 0
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Who holds the talking stick and who is waiting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TalkingQueue {
    waiting: VecDeque<String>,
    current: Option<String>,
}

impl TalkingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a speaker; blank names are ignored
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.waiting.push_back(name.to_string());
        true
    }

    /// Pass the stick to the next waiting speaker
    ///
    /// Returns the new speaker, or `None` (keeping the current one) when
    /// nobody is waiting.
    pub fn next(&mut self) -> Option<&str> {
        let speaker = self.waiting.pop_front()?;
        self.current = Some(speaker);
        self.current.as_deref()
    }

    /// Drop a waiting speaker by position (0-based)
    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.waiting.remove(index)
    }

    pub fn clear(&mut self) {
        self.waiting.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn waiting(&self) -> impl Iterator<Item = &str> {
        self.waiting.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agendas() {
        let hour = agenda("60min").unwrap();
        assert_eq!(hour.total_minutes(), 60);
        assert_eq!(
            hour.segments.iter().map(|s| s.minutes).collect::<Vec<_>>(),
            vec![5, 15, 20, 15, 5]
        );

        let long = agenda("90MIN").unwrap();
        assert_eq!(long.title, "90-Minute Deep Dive");
        assert_eq!(long.total_minutes(), 90);

        assert!(agenda("custom").is_none());
    }

    #[test]
    fn test_countdown_runs_to_zero_once() {
        let mut timer = Countdown::start(1);
        assert_eq!(timer.display(), "01:00");

        for _ in 0..59 {
            assert_eq!(timer.tick(), TickOutcome::Running);
        }
        assert_eq!(timer.display(), "00:01");
        assert_eq!(timer.tick(), TickOutcome::Finished);
        assert!(timer.is_finished());
        assert!(!timer.running);

        // saturates
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.remaining, 0);
    }

    #[test]
    fn test_countdown_pause_resume_reset() {
        let mut timer = Countdown::start(2);
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.remaining, 119);

        timer.resume();
        timer.tick();
        assert_eq!(timer.remaining, 118);

        timer.reset();
        assert_eq!(timer.remaining, 120);
        assert!(!timer.running);

        timer.toggle();
        assert!(timer.running);
        timer.toggle();
        assert!(!timer.running);
    }

    #[test]
    fn test_finished_countdown_does_not_toggle_back_on() {
        let mut timer = Countdown::start(1);
        timer.remaining = 1;
        assert_eq!(timer.tick(), TickOutcome::Finished);
        timer.toggle();
        assert!(!timer.running);
    }

    #[test]
    fn test_zero_minute_countdown_never_runs() {
        let mut timer = Countdown::start(0);
        assert!(!timer.running);
        timer.resume();
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_talking_queue() {
        let mut queue = TalkingQueue::new();
        assert!(queue.add("Ana"));
        assert!(!queue.add("   "));
        assert!(queue.add("Ben"));
        assert!(queue.add("Cy"));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.next(), Some("Ana"));
        assert_eq!(queue.remove(1), Some("Cy".to_string()));
        assert_eq!(queue.waiting().collect::<Vec<_>>(), vec!["Ben"]);

        assert_eq!(queue.next(), Some("Ben"));
        assert_eq!(queue.next(), None);
        assert_eq!(queue.current(), Some("Ben"));

        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }
}
