use clap::ValueEnum;
use tracing::info;

use pb_kernel::{KernelError, WorkDomain};

use crate::error::Result;
use crate::generate::{DEFAULT_MATRIX_SEED, DEFAULT_SEED_A, DEFAULT_SEED_B};

/// Which implementations a run measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Single-threaded reference only.
    Sequential,
    /// Threaded kernel only.
    Parallel,
    /// Both, reporting the speedup.
    #[default]
    Both,
}

impl Mode {
    pub fn runs_sequential(self) -> bool {
        matches!(self, Mode::Sequential | Mode::Both)
    }

    pub fn runs_parallel(self) -> bool {
        matches!(self, Mode::Parallel | Mode::Both)
    }
}

/// Settings shared by every benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Free-form machine label copied into the report line.
    pub label: String,
    /// Vector length or matrix dimension.
    pub size: usize,
    /// Worker count, already clamped to `size`.
    pub workers: usize,
    pub mode: Mode,
}

impl RunConfig {
    /// Validate `size` and `workers`, clamping `workers` to `size`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if either value is zero.
    pub fn new(label: impl Into<String>, size: usize, workers: usize, mode: Mode) -> Result<Self> {
        let domain = WorkDomain::new(size).map_err(|_| {
            KernelError::InvalidParameter(format!("size must be positive, got {}", size))
        })?;
        let clamped = domain.clamp_workers(workers).map_err(|_| {
            KernelError::InvalidParameter(format!("threads must be positive, got {}", workers))
        })?;
        if clamped != workers {
            info!(requested = workers, threads = clamped, "adjusting threads to size");
        }
        Ok(RunConfig {
            label: label.into(),
            size,
            workers: clamped,
            mode,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotConfig {
    pub run: RunConfig,
    pub seed_a: u64,
    pub seed_b: u64,
}

impl DotConfig {
    pub fn new(run: RunConfig) -> Self {
        DotConfig {
            run,
            seed_a: DEFAULT_SEED_A,
            seed_b: DEFAULT_SEED_B,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatmulConfig {
    pub run: RunConfig,
    pub seed: u64,
}

impl MatmulConfig {
    pub fn new(run: RunConfig) -> Self {
        MatmulConfig {
            run,
            seed: DEFAULT_MATRIX_SEED,
        }
    }
}
