//! `pb-kernel` - Partitioned parallel reduction kernels for parbench.
//!
//! This crate provides:
//! - `partition`: fair contiguous splitting of an index domain across workers
//! - `PaddedSlot`: cache-line aligned per-worker result slots
//! - A `ComputeBackend` trait with a `SequentialBackend` reference and a
//!   `ThreadedBackend` that runs one scoped thread per partition
//! - A square row-major `Matrix` type
//! - Fallible allocation helpers and the kernel error taxonomy

pub mod alloc;
pub mod backend;
pub mod cpu;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod slot;
pub mod threaded;

// Re-export primary types at the crate root for convenience.
pub use backend::ComputeBackend;
pub use cpu::SequentialBackend;
pub use error::{KernelError, Result};
pub use matrix::Matrix;
pub use partition::{partition, WorkDomain};
pub use slot::{PaddedSlot, CACHE_LINE};
pub use threaded::ThreadedBackend;
