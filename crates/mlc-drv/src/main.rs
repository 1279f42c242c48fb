use std::io::Read;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mlc_drv::{compile_and_run, format_result};

/// Compile and run a single program read from standard input (spec §6.1).
#[derive(Parser, Debug)]
#[command(name = "mlc")]
#[command(about = "Compiler and interpreter for the mlc language", long_about = None)]
struct Cli {
    /// Enable per-stage debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;

    let value = compile_and_run(&source).inspect_err(|e| {
        eprintln!("{}", e.to_diagnostic());
    })?;
    println!("{}", format_result(value));
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
