mod kv;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore, Result, StorageError};
