/// Directory layout the loader and dispatcher work in.
use std::path::PathBuf;

pub const DEFAULT_MODULES_DIR: &str = "modules";
pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const ENV_MODULES_DIR: &str = "LOGPARSE_MODULES_DIR";
pub const ENV_INPUT_DIR: &str = "LOGPARSE_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "LOGPARSE_OUTPUT_DIR";

/// Where modules, batch input and parsed output live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// One `<logtype>.toml` descriptor per module.
    pub modules_dir: PathBuf,
    /// Scanned (non-recursively) in batch mode.
    pub input_dir: PathBuf,
    /// Modules write parsed logs here.
    pub output_dir: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(
        modules_dir: impl Into<PathBuf>,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_MODULES_DIR, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}
