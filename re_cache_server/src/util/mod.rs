pub mod digest;

pub use digest::{compute_digest, format_digest};
