pub mod adapter;
pub mod kv;

pub use adapter::{ArchiveStore, Collections};
pub use kv::{KeyValueStore, MemoryStore};
