use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("failed to spawn {task} thread: {source}")]
    Spawn {
        task: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("output writer failed: {0}")]
    Writer(#[source] std::io::Error),
    #[error("output writer thread panicked")]
    WriterPanicked,
    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
