//! Storage backends that are not the SQL database.

pub mod memory;

pub use memory::MemoryRepositoryProvider;
