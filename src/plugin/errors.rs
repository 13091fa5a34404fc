/// Errors raised by log modules and their descriptors.
use std::process::ExitStatus;

use thiserror::Error;

/// Failures raised while a module runs.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The module has no execute capability.
    #[error("module does not provide an execute capability")]
    NotExecutable,

    /// File or process I/O failed inside the module.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An external parser command exited unsuccessfully.
    #[error("parser command exited with {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        /// Exit status of the command.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// An external parser command ran past its `timeout_secs`.
    #[error("parser command timed out after {secs}s")]
    TimedOut {
        /// The configured limit.
        secs: u64,
    },

    /// The module panicked; the payload message is kept.
    #[error("module panicked: {0}")]
    Panicked(String),

    /// Anything else a module author wants to report.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Failures reading or linking a module descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The descriptor file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The descriptor is not valid TOML or has mistyped fields.
    #[error("{0}")]
    Parse(#[from] toml::de::Error),

    /// Both `builtin` and `command` were given.
    #[error("'builtin' and 'command' are mutually exclusive")]
    Conflicting,

    /// `command` is an empty list.
    #[error("'command' must name a program")]
    EmptyCommand,

    /// `builtin` names a module that is not compiled in.
    #[error("no compiled-in module named '{0}'")]
    UnknownBuiltin(String),
}
