/// Module descriptor files (`<modules_dir>/<logtype>.toml`).
///
/// A descriptor names a module and links it to an implementation:
///
/// ```toml
/// description = "Apache access logs"
/// manual = "Usage: -r strict"
/// builtin = "example"                 # compiled-in module, or
/// command = ["./access.sh", "--tz=UTC"]  # external program
/// timeout_secs = 30
/// ```
///
/// A descriptor with neither `builtin` nor `command` is manual-only.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::DescriptorError;

/// Parsed descriptor. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    /// One-line summary shown by `--modules`.
    pub description: Option<String>,
    /// Quick use guide. Overrides the linked module's own guide.
    pub manual: Option<String>,
    /// Name of a compiled-in module.
    pub builtin: Option<String>,
    /// External program and leading arguments.
    pub command: Option<Vec<String>>,
    /// Kill an external program after this many seconds.
    pub timeout_secs: Option<u64>,
}

/// What a descriptor links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Builtin(&'a str),
    Command(&'a [String]),
    ManualOnly,
}

impl Descriptor {
    /// Read and parse a descriptor file.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError` if the file is unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse descriptor text.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError` on malformed TOML or an invalid link.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let descriptor: Self = toml::from_str(text)?;
        descriptor.source()?;
        Ok(descriptor)
    }

    /// The implementation this descriptor links to.
    ///
    /// # Errors
    ///
    /// Returns `DescriptorError::Conflicting` or `DescriptorError::EmptyCommand`.
    pub fn source(&self) -> Result<Source<'_>, DescriptorError> {
        match (&self.builtin, &self.command) {
            (Some(_), Some(_)) => Err(DescriptorError::Conflicting),
            (Some(name), None) => Ok(Source::Builtin(name)),
            (None, Some(argv)) if argv.is_empty() => Err(DescriptorError::EmptyCommand),
            (None, Some(argv)) => Ok(Source::Command(argv)),
            (None, None) => Ok(Source::ManualOnly),
        }
    }
}
