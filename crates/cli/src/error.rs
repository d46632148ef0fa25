use thiserror::Error;

/// Errors surfaced at the command-line boundary, on top of the core's
/// [`store::StoreError`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The underlying store or delta engine failed.
    #[error(transparent)]
    Store(#[from] store::StoreError),

    /// Reading or writing a working-directory file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command's arguments were well-formed for `clap` but invalid in
    /// context (e.g. `--output` pointed at an existing file without
    /// `--force`).
    #[error("{0}")]
    InvalidUsage(String),
}

impl CliError {
    /// Maps this error onto a process exit code: 0 success is implicit
    /// (`CliError` is only ever the `Err` side), 1 usage error, 2
    /// not-found, 3 corruption, 4 I/O.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidUsage(_) => 1,
            CliError::Store(store::StoreError::NoSuchVersion { .. }) => 2,
            CliError::Store(store::StoreError::Delta(delta::DeltaError::CorruptDelta(_))) => 3,
            CliError::Store(store::StoreError::MissingPredecessor { .. }) => 3,
            CliError::Store(store::StoreError::CorruptMetadata(_)) => 3,
            CliError::Io(_) | CliError::Store(store::StoreError::IoError(_)) => 4,
            CliError::Store(_) => 1,
        }
    }
}
