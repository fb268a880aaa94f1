//! opalc - Bootstrap compiler for the Opal language.
//!
//! Parses the command line, runs the driver, and owns the process exit
//! policy: diagnostics print as `<file>:<line>: <message>` on stderr and
//! exit 1, or abort when `-A` was given.

use std::path::PathBuf;

use clap::Parser;
use opalc_drv::Config;
use opalc_util::CompileError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Bootstrap compiler for the Opal language.
///
/// Translates one Opal source file into three C outputs: a declarations
/// header, a types header and an implementation unit.
#[derive(Parser, Debug)]
#[command(name = "opalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap compiler for the Opal language", long_about = None)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Base name for the output files (default: the source path)
    #[arg(short = 'o', value_name = "BASE")]
    output: Option<String>,

    /// Scan only: print the token stream and stop after EOF
    #[arg(short = 's')]
    scan: bool,

    /// Abort (core dump) instead of exiting on a diagnostic
    #[arg(short = 'A')]
    abort: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        source: cli.source.clone(),
        out_base: cli.output.clone(),
        scan_only: cli.scan,
    };

    match opalc_drv::run(&config) {
        Ok(()) => {}
        Err(CompileError::Fatal { line, message }) => {
            eprint!("\n{}:{}: {}\n", cli.source.display(), line, message);
            fail(cli.abort);
        }
        Err(err) => {
            let err = anyhow::Error::new(err)
                .context(format!("failed to compile {}", cli.source.display()));
            eprintln!("error: {:#}", err);
            fail(cli.abort);
        }
    }
}

/// Exit non-zero; with `-A`, abort so the OS can produce a core dump.
fn fail(abort: bool) -> ! {
    if abort {
        std::process::abort();
    }
    std::process::exit(1);
}

/// Logging setup; `--verbose` turns on debug-level traces.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
