/// Modules compiled into the binary.
use super::errors::ModuleError;
use super::module::{Job, LogModule};

/// Starting point for writing a parser module.
///
/// Reports what it was given and writes an empty parsed log. It does no
/// parsing of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleModule;

impl LogModule for ExampleModule {
    fn manual(&self) -> Option<String> {
        Some(
            "This is my usage guide\n\n\
             Module arguments (-r):\n  \
             key=value  passed through to the module as text\n  \
             flag       passed through to the module as true"
                .to_owned(),
        )
    }

    fn execute(&self, job: &Job<'_>) -> Result<(), ModuleError> {
        job.say(format_args!("I have this {} to parse", job.logfile.display()));
        job.say(format_args!("I will write to this file when done: {}", job.outfile));
        if job.args.is_empty() {
            job.say(format_args!("I was given no module arguments"));
        } else {
            job.say(format_args!(
                "I was given {} module argument(s): {}",
                job.args.len(),
                job.args
            ));
        }
        if let Some(tz) = job.args.value("tz") {
            job.say(format_args!("I would convert timestamps to {tz}"));
        }
        if job.args.has("strict") {
            job.say(format_args!("I would stop at the first malformed line"));
        }
        if job.verbose {
            job.say(format_args!("I will print extra processing information"));
        }

        let entries: [&str; 0] = [];
        write_output(job, &entries);
        Ok(())
    }
}

/// Write the parsed log. Write failures are reported here, not to the dispatcher.
fn write_output(job: &Job<'_>, entries: &[&str]) {
    match job.write_entries(entries) {
        Ok(path) => job.say(format_args!("\nParsed log can be found in {}", path.display())),
        Err(err) if job.verbose => job.say(format_args!("Error writing output to disk! --- {err}")),
        Err(_) => job.say(format_args!("Error writing output to disk!")),
    }
}
