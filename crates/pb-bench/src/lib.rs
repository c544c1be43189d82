//! `pb-bench` - Benchmark driver comparing the sequential and threaded
//! parbench kernels.
//!
//! This crate provides:
//! - Seeded input generators
//! - A wall-clock timing helper
//! - The single-line `Report` format
//! - Validated run configuration and the `run_dot` / `run_matmul` drivers

pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod report;
pub mod run;
pub mod timing;

pub use config::{DotConfig, MatmulConfig, Mode, RunConfig};
pub use error::{BenchError, Result};
pub use report::{Kind, Outcome, Report};
pub use run::{run_dot, run_matmul};
