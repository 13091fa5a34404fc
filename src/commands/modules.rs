/// `--modules`: list the modules directory.
use std::io::ErrorKind;

use crate::cli::OutputCtx;
use crate::cli::output::write_modules;
use crate::dispatch::DispatchError;
use crate::plugin::Loader;
use crate::types::ModuleOutput;

/// Run `logparse --modules`.
///
/// A missing modules directory lists as empty.
///
/// # Errors
///
/// Returns `DispatchError::ModulesDir` if the directory exists but cannot be read.
pub fn run(loader: &Loader, ctx: &OutputCtx) -> Result<(), DispatchError> {
    let entries = match loader.available() {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(DispatchError::ModulesDir {
                path: loader.modules_dir().to_path_buf(),
                source,
            });
        }
    };

    let output: Vec<ModuleOutput> = entries.iter().map(ModuleOutput::from).collect();
    write_modules(&output, &loader.modules_dir().display().to_string(), ctx);
    Ok(())
}
