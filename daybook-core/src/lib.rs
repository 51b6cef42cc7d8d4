//! Core types for daybook.
//!
//! - `Event` and related types
//! - `locale` tables (weekday names, month names, priority colors)
//! - `EventStore`, the persisted event list, over a pluggable `Storage`

pub mod daybook_config;
pub mod defaults;
pub mod error;
pub mod event;
pub mod locale;
pub mod storage;
pub mod store;

pub use error::{DaybookError, DaybookResult};
pub use event::{Event, EventId, FieldValue, PriorityLevel};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{EventStore, LoadSource, Selection};
