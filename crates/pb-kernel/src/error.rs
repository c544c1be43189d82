use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("allocation failed for {what} ({bytes} bytes)")]
    AllocationFailure { what: &'static str, bytes: usize },
    #[error("worker spawn failed after {started} of {requested} workers started: {source}")]
    WorkerSpawnFailure {
        started: usize,
        requested: usize,
        #[source]
        source: io::Error,
    },
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl KernelError {
    /// Number of workers that were running when the operation was aborted,
    /// if the failure happened while spawning.
    pub fn workers_started(&self) -> Option<usize> {
        match self {
            KernelError::WorkerSpawnFailure { started, .. } => Some(*started),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
