/// The contract every log parser module implements.
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use super::errors::ModuleError;
use crate::dispatch::ModuleArgs;

/// A log parser module.
///
/// Both capabilities are optional at the type level so a module can be
/// registered before it is complete. A module without `manual` gets a
/// fallback guide; a module without `execute` is reported as not valid for
/// the file it was asked to parse.
pub trait LogModule: Send + Sync {
    /// Quick use guide: required and optional module arguments.
    fn manual(&self) -> Option<String> {
        None
    }

    /// Parse `job.logfile` and write the result to `job.output_path()`.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::NotExecutable` when the module cannot parse at
    /// all, or any other `ModuleError` when parsing fails.
    fn execute(&self, job: &Job<'_>) -> Result<(), ModuleError> {
        let _ = job;
        Err(ModuleError::NotExecutable)
    }
}

/// Where a module's progress messages go.
///
/// Stdout by default. With `--json` stdout carries the report, so module
/// messages move to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Console {
    #[default]
    Stdout,
    Stderr,
}

impl Console {
    #[must_use]
    pub fn for_json(json: bool) -> Self {
        if json { Self::Stderr } else { Self::Stdout }
    }

    /// Print one message line.
    pub fn line(self, args: fmt::Arguments<'_>) {
        match self {
            Self::Stdout => println!("{args}"),
            Self::Stderr => eprintln!("{args}"),
        }
    }

    /// Stdout handle for a child process.
    #[must_use]
    pub fn stdio(self) -> Stdio {
        match self {
            Self::Stdout => Stdio::inherit(),
            Self::Stderr => Stdio::from(io::stderr()),
        }
    }
}

/// Everything a module receives for one file.
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    /// Log file to parse.
    pub logfile: &'a Path,
    /// File name (not path) of the parsed log.
    pub outfile: &'a str,
    /// Directory the parsed log is written into.
    pub output_dir: &'a Path,
    /// Print extra processing information.
    pub verbose: bool,
    /// Normalized `-r` module arguments.
    pub args: &'a ModuleArgs,
    /// Where to print progress messages.
    pub console: Console,
}

impl Job<'_> {
    /// Print a progress message on the job's console.
    pub fn say(&self, args: fmt::Arguments<'_>) {
        self.console.line(args);
    }

    /// Full path of the parsed log.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.outfile)
    }

    /// Write parsed entries, one per line, to [`Job::output_path`].
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn write_entries<S: AsRef<str>>(&self, entries: &[S]) -> io::Result<PathBuf> {
        let path = self.output_path();
        let mut body = String::new();
        for entry in entries {
            body.push_str(entry.as_ref());
            body.push('\n');
        }
        fs::write(&path, body)?;
        Ok(path)
    }
}
