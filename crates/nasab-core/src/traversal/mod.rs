pub mod ancestors;

pub use ancestors::{trace_to_root, MAX_TRACE_DEPTH};
