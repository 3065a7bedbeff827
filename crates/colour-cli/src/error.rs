//! CLI error type and exit codes.

use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client core failure.
    #[error(transparent)]
    Client(#[from] colour_client::ClientError),

    /// Ledger layer failure.
    #[error(transparent)]
    Chain(#[from] colour_chain::ChainError),

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The invocation itself was wrong.
    #[error("{0}")]
    User(String),

    /// The requested canvas does not exist on the channel.
    #[error("canvas not found: {0}")]
    NotFound(String),

    /// The command exists but is not implemented yet.
    #[error("'{0}' is not implemented yet")]
    Unimplemented(&'static str),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::User(_) => 2,
            CliError::Unimplemented(_) => 3,
            _ => 1,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_nonzero() {
        assert_eq!(CliError::User("bad".into()).exit_code(), 2);
        assert_eq!(CliError::Unimplemented("vote").exit_code(), 3);
        assert_eq!(
            CliError::Io(std::io::Error::other("disk")).exit_code(),
            1
        );
    }
}
