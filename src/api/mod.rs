pub mod events_api;
pub mod operations;

pub use events_api::{ApiError, EventsApi};
pub use operations::{EventOperations, Toast, ToastStatus};
