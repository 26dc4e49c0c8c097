use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::command::ExitCode;

/// Errors reported while evaluating a single command line.
///
/// None of these terminate the shell: the evaluator prints the message on the error
/// stream and carries on with the next line. Only [`ShellError::Io`] on the output
/// sinks themselves is propagated further.
#[derive(Debug, Error)]
pub enum ShellError {
    /// `exit` was given an operand that is not an integer.
    #[error("exit: {0}: numeric argument required")]
    InvalidExitCode(String),

    /// The resolved path could not be started as a process.
    #[error("{name}: failed to execute {}: {source}", .path.display())]
    Spawn {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Status the failed command leaves behind, following the usual shell conventions.
    pub fn status(&self) -> ExitCode {
        match self {
            ShellError::InvalidExitCode(_) => 2,
            ShellError::Spawn { .. } => 126,
            ShellError::Io(_) => 1,
        }
    }
}

pub type Result<T, E = ShellError> = std::result::Result<T, E>;
