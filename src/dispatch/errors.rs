/// Errors from the dispatch layer.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::plugin::{DescriptorError, ModuleError};

/// Everything that can stop a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No descriptor for the logtype in the modules directory.
    #[error("No module named '{logtype}' in {}", dir.display())]
    ModuleNotFound {
        logtype: String,
        dir: PathBuf,
        /// Close module names, best first.
        suggestions: Vec<String>,
    },

    /// The descriptor exists but cannot be read or linked.
    #[error("Invalid module descriptor {}: {source}", path.display())]
    InvalidDescriptor {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },

    /// The modules directory cannot be listed.
    #[error("Cannot read modules directory {}: {source}", path.display())]
    ModulesDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The explicit log file does not exist.
    #[error("Log file '{}' not found", path.display())]
    FileNotFound { path: PathBuf },

    /// The batch input directory cannot be listed.
    #[error("Cannot read input directory {}: {source}", path.display())]
    InputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The module has no execute capability.
    #[error("Not a valid module!")]
    CapabilityMissing { logtype: String },

    /// The module failed while parsing.
    #[error("Error in module!")]
    Execution {
        logtype: String,
        #[source]
        source: ModuleError,
    },

    /// Some batch tasks failed; each was reported when it finished.
    #[error("{failed} of {total} log files failed to parse")]
    BatchIncomplete { failed: usize, total: usize },
}

impl DispatchError {
    /// User-facing message. Module failure detail is only shown when `verbose`.
    #[must_use]
    pub fn report(&self, verbose: bool) -> String {
        match self {
            Self::Execution { source, .. } if verbose => format!("{self} --- {source}"),
            _ => self.to_string(),
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CapabilityMissing { .. }
            | Self::Execution { .. }
            | Self::BatchIncomplete { .. } => 1,
            Self::ModuleNotFound { .. } | Self::InvalidDescriptor { .. } | Self::ModulesDir { .. } => 3,
            Self::FileNotFound { .. } | Self::InputDir { .. } => 4,
        }
    }

    /// Machine-readable error code (snake_case).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModuleNotFound { .. } => "module_not_found",
            Self::InvalidDescriptor { .. } => "invalid_descriptor",
            Self::ModulesDir { .. } => "modules_dir_unreadable",
            Self::FileNotFound { .. } => "file_not_found",
            Self::InputDir { .. } => "input_dir_unreadable",
            Self::CapabilityMissing { .. } => "capability_missing",
            Self::Execution { .. } => "module_error",
            Self::BatchIncomplete { .. } => "batch_incomplete",
        }
    }
}
