use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("kernel error: {0}")]
    Kernel(#[from] pb_kernel::KernelError),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
