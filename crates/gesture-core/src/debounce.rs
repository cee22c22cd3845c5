//! Time-gated gesture announcements.
//!
//! The classifier produces a label (or nothing) for every hand in every
//! frame. The debouncer turns that stream into discrete events: a label
//! is announced only if more than `interval` seconds have passed since the
//! last announcement on its channel. With [`DebounceScope::Shared`] there
//! is one channel for all labels; with [`DebounceScope::PerLabel`] each
//! label has its own.
//!
//! Frames without a label never touch the timers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use handsign_common::clock::{Clock, TimestampSecs};
use handsign_common::config::{DebounceConfig, DebounceScope};
use handsign_hand_model::observation::{GestureEvent, GestureLabel};

/// State of one debounce channel at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Nothing announced within the interval.
    Idle,
    /// An announcement happened within the interval.
    Announced,
}

#[derive(Debug, Default)]
struct Timers {
    shared: Option<TimestampSecs>,
    per_label: HashMap<GestureLabel, TimestampSecs>,
}

pub struct Debouncer {
    interval_secs: f64,
    scope: DebounceScope,
    clock: Arc<dyn Clock>,
    timers: Mutex<Timers>,
}

impl Debouncer {
    pub fn new(config: &DebounceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            interval_secs: config.interval_secs,
            scope: config.scope,
            clock,
            timers: Mutex::new(Timers::default()),
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    pub fn scope(&self) -> DebounceScope {
        self.scope
    }

    /// Feed one classification, timestamped by the injected clock.
    pub fn observe(&self, label: Option<&GestureLabel>, hand_index: usize) -> Option<GestureEvent> {
        self.observe_at(label, hand_index, self.clock.now_secs())
    }

    /// Feed one classification at an explicit time.
    ///
    /// The check and the timer update happen under one lock, so concurrent
    /// callers can never both announce within the same interval.
    pub fn observe_at(
        &self,
        label: Option<&GestureLabel>,
        hand_index: usize,
        now: TimestampSecs,
    ) -> Option<GestureEvent> {
        let label = label?;
        let mut timers = self.lock();
        let last = match self.scope {
            DebounceScope::Shared => timers.shared,
            DebounceScope::PerLabel => timers.per_label.get(label).copied(),
        };

        let event = self.gate(last, now, label, hand_index)?;
        match self.scope {
            DebounceScope::Shared => timers.shared = Some(now),
            DebounceScope::PerLabel => {
                timers.per_label.insert(label.clone(), now);
            }
        }
        Some(event)
    }

    /// Channel state for `label` at `now`.
    pub fn state(&self, label: &GestureLabel, now: TimestampSecs) -> ChannelState {
        let timers = self.lock();
        let last = match self.scope {
            DebounceScope::Shared => timers.shared,
            DebounceScope::PerLabel => timers.per_label.get(label).copied(),
        };
        match last {
            Some(t) if now - t <= self.interval_secs => ChannelState::Announced,
            _ => ChannelState::Idle,
        }
    }

    fn gate(
        &self,
        last: Option<TimestampSecs>,
        now: TimestampSecs,
        label: &GestureLabel,
        hand_index: usize,
    ) -> Option<GestureEvent> {
        if let Some(last) = last {
            if now - last <= self.interval_secs {
                tracing::debug!(
                    label = %label,
                    hand_index,
                    since_last = now - last,
                    "Gesture suppressed"
                );
                return None;
            }
        }

        tracing::info!(label = %label, hand_index, timestamp = now, "Gesture announced");
        Some(GestureEvent {
            label: label.clone(),
            hand_index,
            timestamp: now,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
