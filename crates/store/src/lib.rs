#![warn(clippy::unwrap_used)]

pub mod config_store;
pub mod file;
pub mod kv;
pub mod memory;
mod record;

pub use config_store::{ConfigStore, EditOutcome, RawValue, RejectReason};
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
