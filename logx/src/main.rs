//! # logx
//!
//! A CLI tool for auditing how a C/C++ codebase uses its logging call.
//!
//! ## Overview
//!
//! logx is built on top of logxlib. It walks a source tree, finds every call
//! to the logging function (`MLog` unless told otherwise) and prints how those
//! calls break down by category, facility, level and filtering wrapper, along
//! with the files that log the most.
//!
//! ## Usage
//!
//! ```bash
//! # Audit the current directory
//! logx
//!
//! # Audit another tree, only under src/
//! logx ../server --include "src/**"
//!
//! # Audit a different call and wrapper family
//! logx . --call TraceLog --wrapper "TRACE_IF[A-Z]*"
//!
//! # Output as JSON
//! logx . --output json
//! ```

mod render;

use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use logxlib::{
    scan_codebase, CodebaseProvider, FilterConfig, Report, ReportOptions, ScanOptions,
    DEFAULT_CALL, DEFAULT_TOP_FILES, DEFAULT_WRAPPER,
};
use tracing_subscriber::EnvFilter;

use render::OutputMode;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("logx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Audit logging call sites in a C/C++ codebase")
        .arg(
            Arg::new("path")
                .help("Path to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("call")
                .long("call")
                .value_name("NAME")
                .default_value(DEFAULT_CALL)
                .help("Name of the logging call to audit"),
        )
        .arg(
            Arg::new("wrapper")
                .long("wrapper")
                .value_name("REGEX")
                .default_value(DEFAULT_WRAPPER)
                .help("Pattern matching the filtering wrapper macro names"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("skip-dir")
                .long("skip-dir")
                .action(ArgAction::Append)
                .help("Skip directories whose name matches glob pattern"),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("Source file extensions to scan (replaces the C/C++ defaults)"),
        )
        .arg(
            Arg::new("max-args")
                .long("max-args")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Argument count past which a call is parsed in fallback mode [default: 20]"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of files listed in the busiest-files section [default: 10]"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Scan files in parallel"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log per-file progress on stderr"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors on stderr"),
        )
}

/// Set up stderr logging. `RUST_LOG` wins over the verbosity flags.
fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else if matches.get_flag("quiet") {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let patterns = |name: &str| -> Vec<&str> {
        matches
            .get_many::<String>(name)
            .map(|v| v.map(|s| s.as_str()).collect())
            .unwrap_or_default()
    };

    let mut filter = FilterConfig::new()
        .include_many(&patterns("include"))?
        .exclude_many(&patterns("exclude"))?;

    if let Some(dirs) = matches.get_many::<String>("skip-dir") {
        for pattern in dirs {
            filter = filter.skip_dir(pattern)?;
        }
    }

    if let Some(exts) = matches.get_many::<String>("ext") {
        let exts: Vec<&String> = exts.collect();
        filter = filter.extensions(&exts);
    }

    Ok(filter)
}

/// Build scan options from matches
fn build_scan_options(matches: &ArgMatches) -> ScanOptions {
    let mut options = ScanOptions::new().parallel(matches.get_flag("parallel"));

    if let Some(call) = matches.get_one::<String>("call") {
        options = options.call_name(call);
    }
    if let Some(wrapper) = matches.get_one::<String>("wrapper") {
        options = options.wrapper_pattern(wrapper);
    }
    if let Some(&max) = matches.get_one::<usize>("max-args") {
        options = options.max_arguments(max);
    }

    options
}

/// Scan the tree and render the report.
fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let mode = matches
        .get_one::<String>("output")
        .map(|s| OutputMode::from_name(s))
        .unwrap_or_default();
    let top = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(DEFAULT_TOP_FILES);

    let filter = build_filter(matches)?;
    let options = build_scan_options(matches);
    let provider = CodebaseProvider::new(path, filter);

    let result = scan_codebase(&provider, &options)?;
    tracing::debug!(
        files = result.file_count(),
        calls = result.call_count(),
        "scan finished"
    );

    let report = Report::build(&result, &ReportOptions::new().top_files(top));
    render::render_report(&report, mode)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
