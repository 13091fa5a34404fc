/// Manual mode: print a module's quick use guide.
use crate::cli::OutputCtx;
use crate::cli::output::write_manual;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::types::ManualOutput;

/// Run `logparse <logtype> --manual`.
///
/// # Errors
///
/// Returns `DispatchError` if the module cannot be resolved.
pub fn run(dispatcher: &Dispatcher, logtype: &str, ctx: &OutputCtx) -> Result<(), DispatchError> {
    let manual = dispatcher.manual(logtype)?;
    write_manual(
        &ManualOutput {
            logtype: logtype.to_owned(),
            manual,
        },
        ctx,
    );
    Ok(())
}
