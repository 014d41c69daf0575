pub mod person_ops;
pub mod repo;
pub mod similarity;
pub mod store;

pub use repo::{LineageStore, LineageStoreMut};
pub use store::MemoryStore;
