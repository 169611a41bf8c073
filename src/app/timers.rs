use crate::data::config::Config;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Icon,
    Label,
    Buttons,
    Metadata,
    Reclaim,
}

/// Fires once per `period`. A late tick does not queue catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct PollTimer {
    period: Duration,
    next_due: Instant,
}

impl PollTimer {
    /// First fire is one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

/// The independent refresh timers. They share no ordering: each one is an
/// idempotent refresh.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    timers: Vec<(TimerKind, PollTimer)>,
}

impl PollSchedule {
    pub fn from_config(config: &Config, now: Instant) -> Self {
        Self::new(
            &[
                (TimerKind::Icon, config.icon_period()),
                (TimerKind::Label, config.label_period()),
                (TimerKind::Buttons, config.buttons_period()),
                (TimerKind::Metadata, config.metadata_period()),
                (TimerKind::Reclaim, config.reclaim_period()),
            ],
            now,
        )
    }

    pub fn new(periods: &[(TimerKind, Duration)], now: Instant) -> Self {
        Self {
            timers: periods
                .iter()
                .map(|&(kind, period)| (kind, PollTimer::new(period, now)))
                .collect(),
        }
    }

    pub fn due(&mut self, now: Instant) -> Vec<TimerKind> {
        self.timers
            .iter_mut()
            .filter_map(|(kind, t)| t.poll(now).then_some(*kind))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|(_, t)| t.next_due()).min()
    }
}
