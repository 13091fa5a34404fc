/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{
    DEFAULT_INPUT_DIR, DEFAULT_MODULES_DIR, DEFAULT_OUTPUT_DIR, ENV_INPUT_DIR, ENV_MODULES_DIR,
    ENV_OUTPUT_DIR, Layout,
};

/// logparse: hand recovered log files to pluggable parser modules.
#[derive(Debug, Parser)]
#[command(
    name = "logparse",
    about = "Parse a recovered log file with a parser module from the modules directory",
    long_about = "Looks up a parser module by log type in the modules directory and hands it a \
                  log file (or every file of the input directory) to interpret. The parsed log \
                  is written to the output directory for analyst use.",
    after_help = "DISCLAIMER: Parsed logs are not guaranteed to be accurate. Accuracy is \
                  determined by the module and the documentation available to its author.",
    version
)]
pub struct Cli {
    /// Type of log file (name of the parser module).
    #[arg(value_name = "LOGTYPE", required_unless_present = "modules")]
    pub logtype: Option<String>,

    /// Log file to parse.
    #[arg(short = 'i', long, value_name = "LOGFILE")]
    pub logfile: Option<PathBuf>,

    /// Output file name for the parsed log. Defaults to <log file name>--output.log.
    #[arg(
        short = 'o',
        long,
        value_name = "OUTFILE",
        num_args = 0..=1,
        default_value = "",
        default_missing_value = "",
        hide_default_value = true
    )]
    pub outfile: String,

    /// Process each file in the input directory and write each result as
    /// <log name>--output.log. --logfile and --outfile are ignored.
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Additional arguments for the module: key=value parameters or bare flags.
    #[arg(
        short = 'r',
        long = "module-args",
        value_name = "ARG",
        num_args = 1..,
        action = ArgAction::Append
    )]
    pub module_args: Vec<String>,

    /// Display verbose parsing information and module error detail.
    #[arg(short, long)]
    pub verbose: bool,

    /// Display the quick use guide for the given module.
    #[arg(short, long)]
    pub manual: bool,

    /// List the modules found in the modules directory.
    #[arg(long)]
    pub modules: bool,

    /// Print results and errors as JSON.
    #[arg(long)]
    pub json: bool,

    /// Directory holding module descriptors.
    #[arg(long, value_name = "DIR", env = ENV_MODULES_DIR, default_value = DEFAULT_MODULES_DIR)]
    pub modules_dir: PathBuf,

    /// Directory scanned by --list.
    #[arg(long, value_name = "DIR", env = ENV_INPUT_DIR, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Directory modules write parsed logs into.
    #[arg(long, value_name = "DIR", env = ENV_OUTPUT_DIR, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Cli {
    /// The directory layout selected by flags and environment.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(&self.modules_dir, &self.input_dir, &self.output_dir)
    }
}
