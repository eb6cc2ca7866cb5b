// vim: set ai et ts=4 sw=4 sts=4:
use std::io;
use thiserror::Error;
use yaml_rust::ScanError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] ScanError),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{section} entry {index}: {message}")]
    InvalidEntry { section: &'static str, index: usize, message: String },

    #[error("puzzle definition has no `{0}` section")]
    MissingSection(&'static str),

    /// (width, height) pairs of the puzzle and of a supplied grid.
    #[error("grid dimensions {found:?} do not match the puzzle dimensions {expected:?}")]
    DimensionMismatch { expected: (usize, usize), found: (usize, usize) },

    #[error("cannot build solver thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl Error {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Parse { line, message: message.into() }
    }
}
