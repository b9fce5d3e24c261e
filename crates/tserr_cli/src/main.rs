//! tserr: Pretty-print TypeScript diagnostic messages.
//!
//! Usage:
//!   tserr [options] [MESSAGE]
//!   tsc --noEmit 2>&1 | some-json-adapter | tserr --stdin
//!
//! Quoted type literals inside the message are extracted, pretty-printed
//! through prettier, and rendered as fenced markdown code blocks.

use clap::Parser as ClapParser;
use std::io::BufRead;
use std::process;
use std::sync::Arc;
use tserr_core::DiagnosticRecord;
use tserr_format::FormatterClient;
use tserr_options::FormatterOptions;
use tserr_segment::segment_message;

#[derive(ClapParser, Debug)]
#[command(name = "tserr", about = "tserr - prettified TypeScript diagnostics")]
struct Cli {
    /// A single diagnostic message to prettify.
    #[arg(value_name = "MESSAGE")]
    message: Option<String>,

    /// Read newline-delimited JSON diagnostic records from stdin.
    #[arg(long)]
    stdin: bool,

    /// Path to a tserr.json configuration file.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Use the blocking formatting path.
    #[arg(long)]
    sync: bool,

    /// Disable the formatting cache.
    #[arg(long = "noCache")]
    no_cache: bool,

    /// Print width requested from the formatter.
    #[arg(long = "printWidth")]
    print_width: Option<u32>,

    /// Formatting timeout in milliseconds.
    #[arg(long = "timeoutMs")]
    timeout_ms: Option<u64>,

    /// Formatter executable, overriding discovery.
    #[arg(long)]
    formatter: Option<String>,

    /// Disable ANSI colors.
    #[arg(long)]
    plain: bool,

    /// Stderr log level (error, warn, info, debug, trace).
    #[arg(long = "logLevel", default_value = "warn")]
    log_level: String,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    // Build formatter options; CLI flags override tserr.json
    let mut options = if let Some(ref project) = cli.project {
        match tserr_options::parse_options_file(project) {
            Ok(options) => options,
            Err(e) => {
                print_error(&format!("Failed to read project '{}': {}", project, e));
                return 1;
            }
        }
    } else {
        FormatterOptions::default()
    };

    if cli.no_cache {
        options.cache = Some(false);
    }
    if cli.sync {
        options.prefer_sync = Some(true);
    }
    if cli.print_width.is_some() {
        options.print_width = cli.print_width;
    }
    if cli.timeout_ms.is_some() {
        options.timeout_ms = cli.timeout_ms;
    }
    if cli.formatter.is_some() {
        options.formatter_command = cli.formatter.clone();
    }

    let resolved = options.resolve();
    let prefer_sync = resolved.prefer_sync;
    let client = Arc::new(FormatterClient::new(resolved));

    let records = match collect_records(cli) {
        Ok(records) => records,
        Err(code) => return code,
    };
    if records.is_empty() {
        print_error("No diagnostic input. Pass a message or use --stdin.");
        return 1;
    }

    let use_color = !cli.plain && atty_is_terminal();
    let runtime = if prefer_sync {
        None
    } else {
        Some(tokio::runtime::Runtime::new().expect("Failed to create tokio runtime"))
    };

    for record in &records {
        let mut segments = segment_message(&record.message);
        match &runtime {
            Some(rt) => {
                rt.block_on(client.format_segments(&mut segments));
            }
            None => {
                for segment in segments.iter_mut().filter(|s| s.is_code()) {
                    segment.content = client.format_sync(&segment.content);
                }
            }
        }
        print_rendered(&tserr_render::render_diagnostic(record, &segments), use_color);
    }

    0
}

/// Gather diagnostic records from the positional message and/or stdin.
fn collect_records(cli: &Cli) -> Result<Vec<DiagnosticRecord>, i32> {
    let mut records = Vec::new();
    if let Some(ref message) = cli.message {
        records.push(DiagnosticRecord::from_message(message.clone()));
    }
    if cli.stdin {
        let stdin = std::io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    print_error(&format!("Failed to read stdin: {}", e));
                    return Err(1);
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<DiagnosticRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // tolerate raw message lines among JSON records
                    if line.trim_start().starts_with('{') {
                        print_error(&format!("Skipping malformed record on line {}: {}", number + 1, e));
                    } else {
                        records.push(DiagnosticRecord::from_message(line));
                    }
                }
            }
        }
    }
    Ok(records)
}

/// Print one rendered diagnostic, colorizing the header and fences.
fn print_rendered(rendered: &str, use_color: bool) {
    if !use_color {
        print!("{}", rendered);
        println!();
        return;
    }
    for line in rendered.lines() {
        if line.starts_with("error") {
            println!("{}{}{}", RED, line, RESET);
        } else if line.starts_with("warning") {
            println!("{}{}{}", YELLOW, line, RESET);
        } else if line.starts_with("```") {
            println!("{}{}{}{}", BOLD, GRAY, line, RESET);
        } else {
            println!("{}", line);
        }
    }
    println!();
}

fn init_logging(level: &str) {
    let level = match level {
        "error" => tracing::Level::ERROR,
        "warn" => tracing::Level::WARN,
        "info" => tracing::Level::INFO,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        other => {
            eprintln!("Unknown log level '{}', defaulting to warn.", other);
            tracing::Level::WARN
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    // Simple check - on Unix, check if stderr is a terminal
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true // Assume terminal on other platforms
    }
}
