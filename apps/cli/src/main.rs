use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;

use cqparse_core::{OutputStyle, VERSION, flatten_call, read_call, render};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    None,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser)]
#[command(name = "cqparse")]
#[command(about = "Flatten the call quality stats of a call record into a single JSON object")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Call record to read. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Show version
    #[arg(long)]
    version: bool,

    /// Pretty-print the output object
    #[arg(long)]
    pretty: bool,

    /// Diagnostics verbosity on stderr (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let call = read_call(cli.file.as_deref())?;
    log::info!(
        "call {} has {} metadata entries",
        call.call_id,
        call.metadata.len()
    );

    let output_style = if cli.pretty {
        OutputStyle::Pretty
    } else {
        OutputStyle::Compact
    };
    let rendered = render(&flatten_call(&call), output_style)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("Call Quality parser version: {}", VERSION);
        return;
    }

    init_logging(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("Error:").for_stderr().red().bold(), e);
        std::process::exit(1);
    }
}
