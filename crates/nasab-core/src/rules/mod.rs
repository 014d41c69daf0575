pub mod admission;
pub mod invariants;

pub use admission::{admit, Admission, SIMILARITY_THRESHOLD};
pub use invariants::audit_lineage;
