/// Batch mode: every file of the input directory, on a bounded worker pool.
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{bounded, unbounded};
use tracing::{info, warn};

use super::{DispatchError, Dispatcher, FileRequest, derive_outfile};
use crate::plugin::Console;

/// One batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchRequest<'a> {
    pub logtype: &'a str,
    pub module_args: &'a [String],
    pub verbose: bool,
    pub console: Console,
}

/// Result of one file in a batch.
#[derive(Debug)]
pub struct TaskOutcome {
    pub logfile: PathBuf,
    /// Always the derived name.
    pub outfile: String,
    pub result: Result<(), DispatchError>,
}

/// All task outcomes, sorted by log file.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub tasks: Vec<TaskOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.tasks.iter().filter(|t| t.result.is_err()).count()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }
}

impl Dispatcher {
    /// Dispatch every regular file directly inside the input directory.
    ///
    /// Explicit output names do not apply here: each file gets its derived name.
    /// Task failures are logged as they happen and collected in the report;
    /// they never stop sibling tasks.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InputDir` if the input directory cannot be listed.
    pub fn dispatch_all(&self, req: &BatchRequest<'_>) -> Result<BatchReport, DispatchError> {
        let logfiles = self.enumerate_inputs()?;
        if logfiles.is_empty() {
            info!(dir = %self.layout().input_dir.display(), "input directory is empty");
            return Ok(BatchReport::default());
        }

        let workers = worker_count(logfiles.len());
        info!(files = logfiles.len(), workers, "starting batch");

        let (job_tx, job_rx) = bounded::<PathBuf>(workers);
        let (done_tx, done_rx) = unbounded::<TaskOutcome>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                scope.spawn(move || {
                    for logfile in job_rx {
                        if done_tx.send(self.run_task(req, logfile)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(done_tx);

            for logfile in logfiles {
                if job_tx.send(logfile).is_err() {
                    break;
                }
            }
            drop(job_tx);
        });

        let mut tasks: Vec<TaskOutcome> = done_rx.into_iter().collect();
        tasks.sort_by(|a, b| a.logfile.cmp(&b.logfile));
        let report = BatchReport { tasks };
        info!(
            total = report.total(),
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    }

    fn run_task(&self, req: &BatchRequest<'_>, logfile: PathBuf) -> TaskOutcome {
        let file_req = FileRequest {
            logtype: req.logtype,
            logfile: &logfile,
            outfile: "",
            module_args: req.module_args,
            verbose: req.verbose,
            console: req.console,
        };
        let result = self.dispatch_one(&file_req).map(|_| ());
        if let Err(err) = &result {
            warn!(logfile = %logfile.display(), "{}", err.report(req.verbose));
        }
        let outfile = derive_outfile(&logfile.to_string_lossy());
        TaskOutcome {
            logfile,
            outfile,
            result,
        }
    }

    /// Regular files directly inside the input directory, sorted.
    fn enumerate_inputs(&self) -> Result<Vec<PathBuf>, DispatchError> {
        let dir = &self.layout().input_dir;
        let input_err = |source| DispatchError::InputDir {
            path: dir.clone(),
            source,
        };

        let mut logfiles = Vec::new();
        for entry in fs::read_dir(dir).map_err(input_err)? {
            let path = entry.map_err(input_err)?.path();
            if path.is_file() {
                logfiles.push(path);
            }
        }
        logfiles.sort();
        Ok(logfiles)
    }
}

/// Available parallelism, capped at the number of files.
fn worker_count(files: usize) -> usize {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(files)
        .max(1)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::super::testing::fixture;
    use super::*;

    fn batch<'a>(logtype: &'a str, args: &'a [String]) -> BatchRequest<'a> {
        BatchRequest {
            logtype,
            module_args: args,
            verbose: false,
            console: Console::Stderr,
        }
    }

    #[test]
    fn test_each_file_gets_derived_name() {
        let fx = fixture();
        fx.input("a.log");
        fx.input("b.log");
        fs::create_dir(fx.root.path().join("input").join("nested")).unwrap();

        let report = fx.dispatcher.dispatch_all(&batch("recorder", &[])).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 0);

        let mut outfiles: Vec<String> = fx
            .recorder
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.outfile.clone())
            .collect();
        outfiles.sort();
        assert_eq!(outfiles, ["a.log--output.log", "b.log--output.log"]);
        assert_eq!(report.tasks[0].outfile, "a.log--output.log");
        assert_eq!(report.tasks[1].outfile, "b.log--output.log");
    }

    #[test]
    fn test_failures_do_not_stop_siblings() {
        let fx = fixture();
        for name in ["a.log", "bad.log", "c.log", "panic.log", "e.log"] {
            fx.input(name);
        }

        let report = fx.dispatcher.dispatch_all(&batch("recorder", &[])).unwrap();
        assert_eq!(report.total(), 5);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(fx.recorder.calls.lock().unwrap().len(), 3);

        let failed: Vec<&str> = report
            .tasks
            .iter()
            .filter(|t| t.result.is_err())
            .filter_map(|t| t.logfile.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(failed, ["bad.log", "panic.log"]);
    }

    #[test]
    fn test_capability_missing_per_file() {
        let fx = fixture();
        fx.input("a.log");
        fx.input("b.log");

        let report = fx.dispatcher.dispatch_all(&batch("hollow", &[])).unwrap();
        assert_eq!(report.total(), 2);
        assert!(report
            .tasks
            .iter()
            .all(|t| matches!(t.result, Err(DispatchError::CapabilityMissing { .. }))));
    }

    #[test]
    fn test_module_args_reach_every_task() {
        let fx = fixture();
        fx.input("a.log");
        fx.input("b.log");
        let args = vec!["tz=UTC".to_owned()];

        fx.dispatcher.dispatch_all(&batch("recorder", &args)).unwrap();
        let calls = fx.recorder.calls.lock().unwrap();
        assert!(calls.iter().all(|c| c.args == r#"{"tz":"UTC"}"#));
    }

    #[test]
    fn test_empty_input_dir() {
        let fx = fixture();
        let report = fx.dispatcher.dispatch_all(&batch("recorder", &[])).unwrap();
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_missing_input_dir() {
        let fx = fixture();
        fs::remove_dir(fx.root.path().join("input")).unwrap();
        let result = fx.dispatcher.dispatch_all(&batch("recorder", &[]));
        assert!(matches!(result, Err(DispatchError::InputDir { .. })));
    }

    #[test]
    fn test_worker_count_bounds() {
        assert_eq!(worker_count(1), 1);
        assert!(worker_count(1000) >= 1);
        assert!(worker_count(0) >= 1);
    }
}
