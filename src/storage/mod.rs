/// Module containing the file-backed key-value store
pub mod file;
/// Module containing namespaced storage keys
pub mod keys;
/// Module containing the key-value store trait and the in-memory store
pub mod kv;

pub use file::FileStore;
pub use keys::StorageKeys;
pub use kv::{KeyValueStore, MemoryStore};
