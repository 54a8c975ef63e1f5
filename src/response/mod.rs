//! Answer assembly: grounded model calls with a deterministic fallback.

pub mod assembler;
pub mod fallback;

pub use assembler::ResponseAssembler;
