/// Single-file mode.
use crate::cli::output::write_file_report;
use crate::cli::{Cli, OutputCtx};
use crate::dispatch::{DispatchError, Dispatcher, FileRequest};
use crate::plugin::Console;
use crate::types::FileOutput;

/// Run `logparse <logtype> -i <logfile>`.
///
/// # Errors
///
/// Returns `DispatchError::FileNotFound` if the log file does not exist, or the
/// module failure from the dispatch.
pub fn run(
    dispatcher: &Dispatcher,
    cli: &Cli,
    logtype: &str,
    ctx: &OutputCtx,
) -> Result<(), DispatchError> {
    let Some(logfile) = cli.logfile.as_deref() else {
        return Ok(());
    };

    let have_file = logfile.is_file();
    ctx.check(
        "Log File",
        &logfile.display().to_string(),
        have_file,
        "Found Log File",
        "No Log File",
    );
    ctx.status("");
    if !have_file {
        ctx.fatal("Logfile not found. EXITING");
        return Err(DispatchError::FileNotFound {
            path: logfile.to_path_buf(),
        });
    }

    ctx.status(&format!("Calling {logtype} log parser...."));
    let done = dispatcher.dispatch_one(&FileRequest {
        logtype,
        logfile,
        outfile: &cli.outfile,
        module_args: &cli.module_args,
        verbose: ctx.verbose,
        console: Console::for_json(ctx.json),
    })?;

    write_file_report(&FileOutput::from_dispatched(&done), ctx);
    Ok(())
}
