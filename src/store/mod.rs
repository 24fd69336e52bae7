//! Quiz session state, countdown and local persistence.

mod countdown;
mod persistence;
mod session_store;
mod snapshot;

pub use countdown::{Countdown, CountdownId, Tick, TICK_PERIOD};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use session_store::{AUTOSAVE_EVERY_SECS, SessionStore, SubscriptionId};
pub use snapshot::{EMAIL_KEY, PROGRESS_KEY, SNAPSHOT_TTL_HOURS, SavedSnapshot};
