/// Dispatch layer: hand log files to resolved modules, one at a time or in batch.
pub mod args;
pub mod batch;
pub mod errors;
pub mod outfile;

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info};

pub use args::{ModuleArgs, normalize};
pub use batch::{BatchReport, BatchRequest, TaskOutcome};
pub use errors::DispatchError;
pub use outfile::{derive_outfile, resolve_outfile};

use crate::config::Layout;
use crate::plugin::{Console, Job, Loader, LogModule, ModuleError};

/// Printed in place of a guide for modules that do not provide one.
pub const NO_MANUAL: &str = "Module does not have a provided usage guide.";

/// One single-file dispatch.
#[derive(Debug, Clone, Copy)]
pub struct FileRequest<'a> {
    pub logtype: &'a str,
    pub logfile: &'a Path,
    /// Empty means derive from `logfile`.
    pub outfile: &'a str,
    /// Raw `-r` tokens, normalized per dispatch.
    pub module_args: &'a [String],
    pub verbose: bool,
    pub console: Console,
}

/// A completed single-file dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub logfile: PathBuf,
    pub outfile: String,
    pub output_path: PathBuf,
}

/// Resolves modules through a [`Loader`] and runs them against log files.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    loader: Loader,
    layout: Layout,
}

impl Dispatcher {
    #[must_use]
    pub fn new(loader: Loader, layout: Layout) -> Self {
        Self { loader, layout }
    }

    #[must_use]
    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The module's quick use guide, or [`NO_MANUAL`].
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the module cannot be resolved.
    pub fn manual(&self, logtype: &str) -> Result<String, DispatchError> {
        let module = self.loader.resolve(logtype)?;
        Ok(module.manual().unwrap_or_else(|| NO_MANUAL.to_owned()))
    }

    /// Run the module for one log file.
    ///
    /// Every module failure, panics included, is returned as a `DispatchError`;
    /// nothing raised by a module escapes this call.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::ModuleNotFound` / `InvalidDescriptor` before any
    /// module code runs, `CapabilityMissing` for a module without execute, and
    /// `Execution` for any failure inside the module.
    pub fn dispatch_one(&self, req: &FileRequest<'_>) -> Result<Dispatched, DispatchError> {
        let module = self.loader.resolve(req.logtype)?;

        let outfile = resolve_outfile(req.logfile, req.outfile);
        let args = normalize(req.module_args);
        let job = Job {
            logfile: req.logfile,
            outfile: &outfile,
            output_dir: &self.layout.output_dir,
            verbose: req.verbose,
            args: &args,
            console: req.console,
        };

        info!(logtype = req.logtype, logfile = %req.logfile.display(), outfile = %outfile, "dispatching");
        run_guarded(module.as_ref(), &job).map_err(|source| match source {
            ModuleError::NotExecutable => DispatchError::CapabilityMissing {
                logtype: req.logtype.to_owned(),
            },
            source => DispatchError::Execution {
                logtype: req.logtype.to_owned(),
                source,
            },
        })?;
        debug!(logfile = %req.logfile.display(), "module finished");

        let output_path = job.output_path();
        Ok(Dispatched {
            logfile: req.logfile.to_path_buf(),
            outfile,
            output_path,
        })
    }
}

thread_local! {
    /// Set while this thread runs module code under `run_guarded`.
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANICS: Once = Once::new();

/// Panics inside guarded module code go to the debug log; any other panic
/// still reaches the previous hook.
fn install_panic_hook() {
    QUIET_PANICS.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARDED.with(Cell::get) {
                debug!(%info, "module panicked");
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `execute`, turning a panic into `ModuleError::Panicked`.
fn run_guarded(module: &dyn LogModule, job: &Job<'_>) -> Result<(), ModuleError> {
    install_panic_hook();
    GUARDED.with(|g| g.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| module.execute(job)));
    GUARDED.with(|g| g.set(false));
    result.unwrap_or_else(|payload| Err(ModuleError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
