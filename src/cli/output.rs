/// Console output: status lines, module table, reports, JSON. TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::types::{BatchOutput, ErrorOutput, FileOutput, ManualOutput, ModuleOutput};

/// Output context passed to all writers.
pub struct OutputCtx {
    /// Machine-readable output; status lines are suppressed.
    pub json: bool,
    /// Show module error detail.
    pub verbose: bool,
    /// Use ANSI colors.
    pub color: bool,
}

impl OutputCtx {
    /// Construct from CLI flags. Colors only on a TTY without `NO_COLOR`.
    #[must_use]
    pub fn new(json: bool, verbose: bool) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            json,
            verbose,
            color,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    /// Print a plain status line.
    pub fn status(&self, line: &str) {
        if !self.json {
            println!("{line}");
        }
    }

    /// Print a bold status line.
    pub fn heading(&self, line: &str) {
        if !self.json {
            println!("{}", self.paint(line, Style::new().bold()));
        }
    }

    /// `"<label>: <value> -- <Found|Missing>"`, green or red.
    pub fn check(&self, label: &str, value: &str, found: bool, found_text: &str, missing_text: &str) {
        if self.json {
            return;
        }
        let verdict = if found {
            self.paint(found_text, Style::new().green())
        } else {
            self.paint(missing_text, Style::new().red())
        };
        println!("{label}: {value} -- {verdict}");
    }

    /// Print a red, bold line announcing that the run stops.
    pub fn fatal(&self, line: &str) {
        if !self.json {
            println!("\n{}", self.paint(line, Style::new().red().bold()));
        }
    }
}

// --- Modules ---

/// Write the module listing.
pub fn write_modules(modules: &[ModuleOutput], dir: &str, ctx: &OutputCtx) {
    if ctx.json {
        print_json(modules);
        return;
    }

    println!("\nAvailable logtype modules can be found in {dir}:");
    if modules.is_empty() {
        println!("  (none)");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(["MODULE", "KIND", "DESCRIPTION"]);
    for module in modules {
        let description = module
            .problem
            .as_deref()
            .or(module.description.as_deref())
            .unwrap_or("");
        table.add_row([module.name.as_str(), module.kind.as_str(), description]);
    }
    println!("{table}");
}

// --- Manual ---

/// Write a module's quick use guide.
pub fn write_manual(manual: &ManualOutput, ctx: &OutputCtx) {
    if ctx.json {
        print_json(manual);
    } else {
        println!();
        println!("{}", manual.manual);
    }
}

// --- Dispatch results ---

/// Write the result of a single-file dispatch. Modules announce their own
/// output on the console, so only `--json` adds anything here.
pub fn write_file_report(report: &FileOutput, ctx: &OutputCtx) {
    if ctx.json {
        print_json(report);
    }
}

/// Write a batch summary: one line per failed file, then the totals.
pub fn write_batch_report(report: &BatchOutput, ctx: &OutputCtx) {
    if ctx.json {
        print_json(report);
        return;
    }

    for file in report.files.iter().filter(|f| !f.ok) {
        let message = file.error.as_ref().map_or("", |e| e.message.as_str());
        println!("{}: {message}", file.logfile);
    }
    let summary = format!(
        "\nProcessed {} log file(s): {} parsed, {} failed",
        report.total, report.succeeded, report.failed
    );
    let style = if report.failed == 0 {
        Style::new().green()
    } else {
        Style::new().yellow()
    };
    println!("{}", ctx.paint(&summary, style));
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
        if let Some(suggestions) = &err.error.suggestions {
            let _ = writeln!(out, "  Did you mean:");
            for s in suggestions {
                let _ = writeln!(out, "    {s}");
            }
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
