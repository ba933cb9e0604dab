//! Pomodoro countdown state.
//!
//! The timer alternates between a focus interval and a break interval and is
//! advanced by [`Pomodoro::tick`], once per second by the caller:
//!
//! ```text
//! Focus(t > 0) -> Focus(t - 1)
//! Focus(0)     -> Break(break_secs)    completed_focus += 1
//! Break(t > 0) -> Break(t - 1)
//! Break(0)     -> Focus(focus_secs)
//! ```
//!
//! Ticks are ignored while paused. Nothing here is persisted.

use std::fmt;

use super::config::PomodoroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    Break,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Focus => f.write_str("Focus"),
            Phase::Break => f.write_str("Break"),
        }
    }
}

/// What a tick did, so the caller can react to phase changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Paused,
    Counting,
    FocusCompleted,
    BreakCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    focus_secs: u32,
    break_secs: u32,
    phase: Phase,
    remaining: u32,
    running: bool,
    completed_focus: u32,
}

impl Pomodoro {
    pub fn new(focus_secs: u32, break_secs: u32) -> Self {
        Pomodoro {
            focus_secs,
            break_secs,
            phase: Phase::Focus,
            remaining: focus_secs,
            running: false,
            completed_focus: 0,
        }
    }

    pub fn from_config(config: &PomodoroConfig) -> Self {
        Pomodoro::new(config.focus_minutes.saturating_mul(60), config.break_minutes.saturating_mul(60))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    pub fn focus_secs(&self) -> u32 {
        self.focus_secs
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to a full focus interval, stopped. The completed count is kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Focus;
        self.remaining = self.focus_secs;
        self.running = false;
    }

    pub fn tick(&mut self) -> TickEvent {
        if !self.running {
            return TickEvent::Paused;
        }

        if self.remaining > 0 {
            self.remaining -= 1;
            return TickEvent::Counting;
        }

        match self.phase {
            Phase::Focus => {
                self.completed_focus += 1;
                self.phase = Phase::Break;
                self.remaining = self.break_secs;
                TickEvent::FocusCompleted
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.remaining = self.focus_secs;
                TickEvent::BreakCompleted
            }
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_saturates_huge_minutes() {
        let timer = Pomodoro::from_config(&PomodoroConfig {
            focus_minutes: 80_000_000,
            break_minutes: 5,
        });
        assert_eq!(timer.focus_secs(), u32::MAX);
        assert_eq!(timer.remaining(), u32::MAX);
    }

    #[test]
    fn test_from_config_converts_minutes() {
        let timer = Pomodoro::from_config(&PomodoroConfig::default());
        assert_eq!(timer.focus_secs(), 25 * 60);
        assert_eq!(timer.display(), "25:00");
    }

    #[test]
    fn test_focus_counts_down_then_switches_to_break() {
        let mut timer = Pomodoro::new(2, 1);
        timer.start();
        assert_eq!(timer.tick(), TickEvent::Counting);
        assert_eq!(timer.tick(), TickEvent::Counting);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.phase(), Phase::Focus);

        assert_eq!(timer.tick(), TickEvent::FocusCompleted);
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining(), 1);
        assert_eq!(timer.completed_focus(), 1);
    }

    #[test]
    fn test_break_returns_to_focus() {
        let mut timer = Pomodoro::new(1, 1);
        timer.start();
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.tick(), TickEvent::Counting);
        assert_eq!(timer.tick(), TickEvent::BreakCompleted);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining(), 1);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut timer = Pomodoro::new(10, 5);
        timer.start();
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TickEvent::Paused);
        assert_eq!(timer.remaining(), 9);
        timer.toggle();
        assert!(timer.is_running());
    }

    #[test]
    fn test_reset_from_break() {
        let mut timer = Pomodoro::new(1, 3);
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.phase(), Phase::Break);

        timer.reset();
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining(), 1);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_focus(), 1);
    }

    #[test]
    fn test_display_format() {
        let timer = Pomodoro::from_config(&PomodoroConfig::default());
        assert_eq!(timer.display(), "25:00");
        assert_eq!(format_clock(61), "01:01");
    }
}
