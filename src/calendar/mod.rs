pub mod date_math;
pub mod event;
pub mod reminder;

pub use event::{Event, Repeat, RepeatType, find_overlapping_events};
pub use reminder::{Clock, Notification, ReminderEngine, ReminderScheduler, SystemClock};
