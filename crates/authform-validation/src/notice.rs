//! Transient notification messages
//!
//! Flash messages stay up for a fixed window, then play a short exit
//! transition before being removed. Closing one early starts the exit right away.
//! Nothing here reads a clock: callers pass the time elapsed since page load.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeTimings {
    /// How long a notice stays fully visible
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    /// Length of the exit transition
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

fn default_display_ms() -> u64 {
    5000
}

fn default_exit_ms() -> u64 {
    300
}

impl Default for NoticeTimings {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

impl NoticeTimings {
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticePhase {
    Visible,
    Exiting,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    shown_at: Duration,
    dismissed_at: Option<Duration>,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>, shown_at: Duration) -> Self {
        Self {
            level,
            text: text.into(),
            shown_at,
            dismissed_at: None,
        }
    }

    /// When the exit transition starts
    pub fn exit_starts_at(&self, timings: &NoticeTimings) -> Duration {
        let natural = self.shown_at + timings.display();
        match self.dismissed_at {
            Some(dismissed) => dismissed.min(natural),
            None => natural,
        }
    }

    pub fn phase(&self, now: Duration, timings: &NoticeTimings) -> NoticePhase {
        let exit_start = self.exit_starts_at(timings);
        if now < exit_start {
            NoticePhase::Visible
        } else if now < exit_start + timings.exit() {
            NoticePhase::Exiting
        } else {
            NoticePhase::Removed
        }
    }

    /// Close button. Returns false if the notice was already leaving.
    pub fn dismiss(&mut self, now: Duration, timings: &NoticeTimings) -> bool {
        if self.phase(now, timings) != NoticePhase::Visible {
            return false;
        }
        self.dismissed_at = Some(now);
        true
    }
}

/// The messages container
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    timings: NoticeTimings,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new(timings: NoticeTimings) -> Self {
        Self {
            timings,
            notices: Vec::new(),
        }
    }

    pub fn timings(&self) -> &NoticeTimings {
        &self.timings
    }

    /// Show a notice; returns its index
    pub fn push(&mut self, level: NoticeLevel, text: impl Into<String>, now: Duration) -> usize {
        self.notices.push(Notice::new(level, text, now));
        self.notices.len() - 1
    }

    /// Shorthand for the global error banner
    pub fn error(&mut self, text: impl Into<String>, now: Duration) -> usize {
        self.push(NoticeLevel::Error, text, now)
    }

    pub fn dismiss(&mut self, index: usize, now: Duration) -> bool {
        let timings = self.timings;
        self.notices
            .get_mut(index)
            .map(|notice| notice.dismiss(now, &timings))
            .unwrap_or(false)
    }

    /// Drop notices whose exit transition has finished; returns how many
    pub fn prune(&mut self, now: Duration) -> usize {
        let timings = self.timings;
        let before = self.notices.len();
        self.notices
            .retain(|notice| notice.phase(now, &timings) != NoticePhase::Removed);
        before - self.notices.len()
    }

    /// Notices still on screen (visible or exiting) with their phase
    pub fn on_screen(&self, now: Duration) -> impl Iterator<Item = (&Notice, NoticePhase)> + '_ {
        self.notices
            .iter()
            .map(move |notice| (notice, notice.phase(now, &self.timings)))
            .filter(|(_, phase)| *phase != NoticePhase::Removed)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
