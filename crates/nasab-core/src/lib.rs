//! Nasab Core - Canonical in-memory lineage kernel
//!
//! This crate provides the foundational data structures and operations for
//! Nasab, including:
//! - Person and parentage-edge models with create/delete semantics
//! - Admission rules (duplicate, near-duplicate, father and grandfather checks)
//! - Deepest-path ancestor tracing with cycle detection
//! - Deletion guarding (childless-only removal)
//! - Whole-graph invariant auditing
//!
//! Persistence lives in `nasab-store`; this crate only defines the store
//! traits and a HashMap-backed implementation suitable for tests and
//! single-process use.

pub mod errors;
pub mod guard;
pub mod identity;
pub mod logging;
pub mod model;
pub mod ops;
pub mod rules;
pub mod traversal;

// Re-export commonly used types
pub use errors::{NasabError, Result};
pub use model::{Gender, KinLabel, ParentEdge, Person, PersonInput, PersonSelector};
pub use ops::{LineageStore, LineageStoreMut, MemoryStore};
