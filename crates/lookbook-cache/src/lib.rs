// SQLite-backed key-value slot
// Holds the favorites list between sessions

pub mod slot;

pub use slot::{CacheError, SlotStore};

pub type Result<T> = std::result::Result<T, CacheError>;
