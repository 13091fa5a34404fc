/// Shared serializable output types.
///
/// These are what `--json` writes to stdout. They are decoupled from the
/// dispatch-layer types.
use serde::{Deserialize, Serialize};

use crate::dispatch::{BatchReport, DispatchError, Dispatched, TaskOutcome};
use crate::plugin::{ModuleEntry, ModuleKind};

/// One module in the modules directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleOutput {
    /// Logtype name (descriptor file stem).
    pub name: String,
    /// `builtin:<name>`, `command`, `manual-only` or `invalid`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Why the descriptor is invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl From<&ModuleEntry> for ModuleOutput {
    fn from(entry: &ModuleEntry) -> Self {
        let problem = match &entry.kind {
            ModuleKind::Invalid(reason) => Some(reason.clone()),
            _ => None,
        };
        Self {
            name: entry.name.clone(),
            kind: entry.kind.to_string(),
            description: entry.description.clone(),
            problem,
        }
    }
}

/// A module's quick use guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOutput {
    pub logtype: String,
    pub manual: String,
}

/// Result of dispatching one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutput {
    pub logfile: String,
    pub outfile: String,
    /// Where the module was asked to write, when the dispatch succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl FileOutput {
    #[must_use]
    pub fn from_dispatched(done: &Dispatched) -> Self {
        Self {
            logfile: done.logfile.display().to_string(),
            outfile: done.outfile.clone(),
            output: Some(done.output_path.display().to_string()),
            ok: true,
            error: None,
        }
    }

    #[must_use]
    pub fn from_task(task: &TaskOutcome, verbose: bool) -> Self {
        Self {
            logfile: task.logfile.display().to_string(),
            outfile: task.outfile.clone(),
            output: None,
            ok: task.result.is_ok(),
            error: task
                .result
                .as_ref()
                .err()
                .map(|err| ErrorDetail::from_dispatch_error(err, verbose)),
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub logtype: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileOutput>,
}

impl BatchOutput {
    #[must_use]
    pub fn from_report(logtype: &str, report: &BatchReport, verbose: bool) -> Self {
        Self {
            logtype: logtype.to_owned(),
            total: report.total(),
            succeeded: report.succeeded(),
            failed: report.failed(),
            files: report
                .tasks
                .iter()
                .map(|t| FileOutput::from_task(t, verbose))
                .collect(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Close module names, for unknown logtypes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ErrorDetail {
    #[must_use]
    pub fn from_dispatch_error(err: &DispatchError, verbose: bool) -> Self {
        let suggestions = match err {
            DispatchError::ModuleNotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some(suggestions.clone())
            }
            _ => None,
        };
        Self {
            code: err.code().to_owned(),
            message: err.report(verbose),
            suggestions,
        }
    }
}

impl ErrorOutput {
    /// Construct from a `DispatchError`.
    #[must_use]
    pub fn from_dispatch_error(err: &DispatchError, verbose: bool) -> Self {
        Self {
            ok: false,
            error: ErrorDetail::from_dispatch_error(err, verbose),
        }
    }
}
