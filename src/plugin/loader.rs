/// Resolve logtype names to modules through descriptor files.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::descriptor::{Descriptor, Source};
use super::errors::{DescriptorError, ModuleError};
use super::external::CommandModule;
use super::module::{Job, LogModule};
use super::registry::Registry;
use super::suggest::suggest;
use crate::dispatch::DispatchError;

/// Extension of descriptor files in the modules directory.
pub const DESCRIPTOR_EXT: &str = "toml";

/// Suggestions attached to a `ModuleNotFound` error.
const MAX_SUGGESTIONS: usize = 3;

/// Looks up `<modules_dir>/<logtype>.toml` and links it to an implementation.
///
/// Descriptors are read on every call; nothing is cached, so modules added or
/// edited while the process runs are picked up by the next resolve.
#[derive(Debug, Clone)]
pub struct Loader {
    modules_dir: PathBuf,
    registry: Registry,
}

/// How a listed module is implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Builtin(String),
    Command,
    ManualOnly,
    Invalid(String),
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(name) => write!(f, "builtin:{name}"),
            Self::Command => f.write_str("command"),
            Self::ManualOnly => f.write_str("manual-only"),
            Self::Invalid(_) => f.write_str("invalid"),
        }
    }
}

/// One entry of the modules directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub name: String,
    pub description: Option<String>,
    pub kind: ModuleKind,
}

impl Loader {
    #[must_use]
    pub fn new(modules_dir: impl Into<PathBuf>, registry: Registry) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            registry,
        }
    }

    #[must_use]
    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Path of the descriptor for `logtype`.
    #[must_use]
    pub fn descriptor_path(&self, logtype: &str) -> PathBuf {
        self.modules_dir.join(format!("{logtype}.{DESCRIPTOR_EXT}"))
    }

    /// Resolve `logtype` to a module handle.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ModuleNotFound` when no descriptor exists, or
    /// `DispatchError::InvalidDescriptor` when it cannot be read or linked.
    pub fn resolve(&self, logtype: &str) -> Result<Arc<dyn LogModule>, DispatchError> {
        let path = self.descriptor_path(logtype);
        if !path.is_file() {
            return Err(DispatchError::ModuleNotFound {
                logtype: logtype.to_owned(),
                dir: self.modules_dir.clone(),
                suggestions: suggest(&self.names(), logtype, MAX_SUGGESTIONS),
            });
        }

        let module = Descriptor::load(&path)
            .and_then(|d| self.link(&d))
            .map_err(|source| DispatchError::InvalidDescriptor { path, source })?;
        debug!(logtype, "resolved module");
        Ok(module)
    }

    fn link(&self, descriptor: &Descriptor) -> Result<Arc<dyn LogModule>, DescriptorError> {
        let inner: Option<Arc<dyn LogModule>> = match descriptor.source()? {
            Source::Builtin(name) => Some(
                self.registry
                    .get(name)
                    .ok_or_else(|| DescriptorError::UnknownBuiltin(name.to_owned()))?,
            ),
            Source::Command(argv) => {
                let (program, args) = argv.split_first().ok_or(DescriptorError::EmptyCommand)?;
                let module: Arc<dyn LogModule> = Arc::new(CommandModule::new(
                    CommandModule::resolve_program(&self.modules_dir, program),
                    args.to_vec(),
                    descriptor.timeout_secs.map(Duration::from_secs),
                ));
                Some(module)
            }
            Source::ManualOnly => None,
        };

        Ok(Arc::new(LinkedModule {
            manual: descriptor.manual.clone(),
            inner,
        }))
    }

    /// Every descriptor in the modules directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the modules directory cannot be read.
    pub fn available(&self) -> io::Result<Vec<ModuleEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.modules_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != DESCRIPTOR_EXT) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let (description, kind) = match Descriptor::load(&path) {
                Ok(d) => {
                    let kind = match d.source() {
                        Ok(Source::Builtin(b)) if self.registry.get(b).is_some() => {
                            ModuleKind::Builtin(b.to_owned())
                        }
                        Ok(Source::Builtin(b)) => ModuleKind::Invalid(
                            DescriptorError::UnknownBuiltin(b.to_owned()).to_string(),
                        ),
                        Ok(Source::Command(_)) => ModuleKind::Command,
                        Ok(Source::ManualOnly) => ModuleKind::ManualOnly,
                        Err(err) => ModuleKind::Invalid(err.to_string()),
                    };
                    (d.description, kind)
                }
                Err(err) => (None, ModuleKind::Invalid(err.to_string())),
            };

            entries.push(ModuleEntry {
                name: name.to_owned(),
                description,
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn names(&self) -> Vec<String> {
        self.available()
            .map(|entries| entries.into_iter().map(|e| e.name).collect())
            .unwrap_or_default()
    }
}

/// A descriptor linked to its implementation. The descriptor's `manual` wins
/// over the implementation's own guide.
struct LinkedModule {
    manual: Option<String>,
    inner: Option<Arc<dyn LogModule>>,
}

impl LogModule for LinkedModule {
    fn manual(&self) -> Option<String> {
        self.manual
            .clone()
            .or_else(|| self.inner.as_ref().and_then(|m| m.manual()))
    }

    fn execute(&self, job: &Job<'_>) -> Result<(), ModuleError> {
        match &self.inner {
            Some(module) => module.execute(job),
            None => Err(ModuleError::NotExecutable),
        }
    }
}
