/// Modules backed by an external program.
///
/// The program runs as `<program> <args...> <logfile> <outfile>` with:
///
/// - `LOGPARSE_OUTPUT_DIR`: directory to write `<outfile>` into
/// - `LOGPARSE_VERBOSE`: `1` or `0`
/// - `LOGPARSE_MODULE_ARGS`: normalized module arguments as a JSON object
///
/// Stdout goes to the job's console. Stderr is captured and attached to the failure when the
/// program exits unsuccessfully.
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::errors::ModuleError;
use super::module::{Job, LogModule};
use crate::config::ENV_OUTPUT_DIR;

pub const ENV_VERBOSE: &str = "LOGPARSE_VERBOSE";
pub const ENV_MODULE_ARGS: &str = "LOGPARSE_MODULE_ARGS";

/// How often a timed command is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A parser module that shells out to a program.
#[derive(Debug, Clone)]
pub struct CommandModule {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandModule {
    #[must_use]
    pub fn new(program: PathBuf, args: Vec<String>, timeout: Option<Duration>) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }

    /// Resolve `program` against the modules directory when it is a relative
    /// path with more than one component (`./parse.sh`, `bin/parse`). Bare
    /// names are left for `PATH` lookup.
    #[must_use]
    pub fn resolve_program(modules_dir: &Path, program: &str) -> PathBuf {
        let path = Path::new(program);
        if path.is_relative() && path.components().count() > 1 {
            modules_dir.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl LogModule for CommandModule {
    fn execute(&self, job: &Job<'_>) -> Result<(), ModuleError> {
        let payload = serde_json::to_string(job.args).map_err(anyhow::Error::from)?;

        debug!(program = %self.program.display(), logfile = %job.logfile.display(), "spawning parser command");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(job.logfile)
            .arg(job.outfile)
            .env(ENV_OUTPUT_DIR, job.output_dir)
            .env(ENV_VERBOSE, if job.verbose { "1" } else { "0" })
            .env(ENV_MODULE_ARGS, payload)
            .stdin(Stdio::null())
            .stdout(job.console.stdio())
            .stderr(Stdio::piped())
            .spawn()?;

        // Stderr is drained while we wait.
        let stderr_pipe = child.stderr.take();
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buf);
            }
            buf
        });

        let status = match self.timeout {
            Some(limit) => wait_with_timeout(&mut child, limit)?,
            None => child.wait()?,
        };
        let stderr = reader.join().unwrap_or_default();

        if status.success() {
            if !stderr.is_empty() {
                let _ = io::stderr().write_all(stderr.as_bytes());
            }
            Ok(())
        } else {
            Err(ModuleError::CommandFailed {
                status,
                stderr: stderr.trim().to_owned(),
            })
        }
    }
}

fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<ExitStatus, ModuleError> {
    // A limit past the clock's range is no limit.
    let Some(deadline) = Instant::now().checked_add(limit) else {
        return Ok(child.wait()?);
    };
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ModuleError::TimedOut {
                secs: limit.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}
