mod api;
mod error;
mod file;
mod keys;
mod maintenance;
mod memory;

pub use api::*;
pub use error::*;
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
