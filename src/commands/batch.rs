/// Batch mode: every file of the input directory.
use tracing::debug;

use crate::cli::output::write_batch_report;
use crate::cli::{Cli, OutputCtx};
use crate::dispatch::{BatchRequest, DispatchError, Dispatcher};
use crate::plugin::Console;
use crate::types::BatchOutput;

/// Run `logparse <logtype> --list`.
///
/// `--logfile` and `--outfile` are ignored; every file gets its derived name.
///
/// # Errors
///
/// Returns `DispatchError::InputDir` if the input directory cannot be read, or
/// `DispatchError::BatchIncomplete` if any file failed.
pub fn run(
    dispatcher: &Dispatcher,
    cli: &Cli,
    logtype: &str,
    ctx: &OutputCtx,
) -> Result<(), DispatchError> {
    if !cli.outfile.is_empty() {
        debug!(outfile = %cli.outfile, "ignoring --outfile in batch mode");
    }

    ctx.status(&format!(
        "Calling {logtype} log parser for every file in {}....",
        dispatcher.layout().input_dir.display()
    ));
    let report = dispatcher.dispatch_all(&BatchRequest {
        logtype,
        module_args: &cli.module_args,
        verbose: ctx.verbose,
        console: Console::for_json(ctx.json),
    })?;

    write_batch_report(&BatchOutput::from_report(logtype, &report, ctx.verbose), ctx);

    match report.failed() {
        0 => Ok(()),
        failed => Err(DispatchError::BatchIncomplete {
            failed,
            total: report.total(),
        }),
    }
}
