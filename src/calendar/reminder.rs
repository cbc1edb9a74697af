use std::collections::HashSet;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;

use crate::calendar::Event;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event_id: String,
    pub message: String,
}

pub fn notification_message(event: &Event) -> String {
    format!("{}분 후 {} 일정이 시작됩니다.", event.notification_time, event.title)
}

/// Session-scoped reminder state: the visible notification list plus the
/// set of event ids that have already fired. Dismissing a notification
/// leaves the id in the set, so a dismissed alert never re-arms.
#[derive(Debug, Default)]
pub struct ReminderEngine {
    notifications: Vec<Notification>,
    notified: HashSet<String>,
}

impl ReminderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// One tick: emit a notification for every event whose trigger instant
    /// has been reached but whose start time has not, unless it already
    /// fired this session. Returns the number of newly emitted
    /// notifications. Idempotent given the notified set.
    pub fn poll(&mut self, events: &[Event], now: NaiveDateTime) -> usize {
        let mut emitted = 0;
        for event in events {
            if self.notified.contains(&event.id) {
                continue;
            }
            if now >= event.trigger_at() && now < event.starts_at() {
                tracing::debug!(event_id = %event.id, "reminder due");
                self.notifications.push(Notification {
                    event_id: event.id.clone(),
                    message: notification_message(event),
                });
                self.notified.insert(event.id.clone());
                emitted += 1;
            }
        }
        emitted
    }

    /// Removes a notification from the visible list without re-arming it.
    /// Out-of-range indices are ignored.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notified(&self) -> &HashSet<String> {
        &self.notified
    }

    pub fn has_notified(&self, event_id: &str) -> bool {
        self.notified.contains(event_id)
    }
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Drives a `ReminderEngine` from a clock, either tick by tick or as a
/// recurring interval task that stops on a shutdown signal.
pub struct ReminderScheduler<C: Clock> {
    engine: ReminderEngine,
    clock: C,
}

impl ReminderScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ReminderScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ReminderScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { engine: ReminderEngine::new(), clock }
    }

    pub fn tick(&mut self, events: &[Event]) -> usize {
        let now = self.clock.now();
        self.engine.poll(events, now)
    }

    pub fn engine(&self) -> &ReminderEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReminderEngine {
        &mut self.engine
    }

    /// Re-evaluates the events every `period` until the shutdown signal
    /// flips to `true` or the sender is dropped.
    pub async fn run(
        &mut self,
        events: &[Event],
        period: std::time::Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(events);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    }
}
