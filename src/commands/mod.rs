/// Mode routing: `--modules`, manual, single file, batch.
pub mod batch;
pub mod manual;
pub mod modules;
pub mod parse;

use crate::cli::{Cli, OutputCtx};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::plugin::{Loader, Registry};

/// Route parsed arguments to the matching mode.
///
/// # Errors
///
/// Returns `DispatchError` when a precondition fails or a module fails.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), DispatchError> {
    let layout = cli.layout();
    let loader = Loader::new(&layout.modules_dir, Registry::builtin());

    if cli.modules {
        return modules::run(&loader, ctx);
    }

    // clap guarantees a logtype unless --modules was given.
    let logtype = cli.logtype.as_deref().unwrap_or_default();
    let dispatcher = Dispatcher::new(loader, layout);

    ctx.heading("Attempting log parse ....");
    let preflight = dispatcher.loader().resolve(logtype);
    let have_module = !matches!(preflight, Err(DispatchError::ModuleNotFound { .. }));
    ctx.check("Log Type", logtype, have_module, "Found Module", "No Module");
    if let Err(err) = preflight {
        if !have_module {
            ctx.fatal("Module not found. EXITING");
        }
        return Err(err);
    }

    if cli.manual || (cli.logfile.is_none() && !cli.list) {
        return manual::run(&dispatcher, logtype, ctx);
    }

    if cli.list {
        batch::run(&dispatcher, cli, logtype, ctx)
    } else {
        parse::run(&dispatcher, cli, logtype, ctx)
    }
}
