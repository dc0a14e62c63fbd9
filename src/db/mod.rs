#[cfg(test)]
pub mod memory;
pub mod model;
pub mod repo;
pub mod sqlite;

#[cfg(test)]
pub use memory::MemoryRepository;
pub use model::*;
pub use repo::*;
pub use sqlite::SqliteRepository;
