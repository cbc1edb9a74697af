pub mod api;
pub mod calendar;
pub mod storage;

pub use calendar::{Event, Repeat, RepeatType};
pub use calendar::{Notification, ReminderEngine, ReminderScheduler};
pub use api::{EventOperations, EventsApi};
pub use storage::Config;
