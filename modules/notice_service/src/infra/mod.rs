//! Infrastructure layer - option store implementations

pub mod memory;
pub mod storage;

pub use memory::InMemoryOptionStore;
pub use storage::SeaOrmOptionStore;
