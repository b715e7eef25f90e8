//! CLI entry point for bnd-ctypes.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

/// bnd-ctypes: generate Python ctypes bindings from the libvlc headers.
#[derive(Parser, Debug)]
#[command(name = "bnd-ctypes", version, about)]
struct Cli {
    /// Path to the bnd-ctypes.toml configuration file.
    #[arg(default_value = "bnd-ctypes.toml")]
    config: PathBuf,

    /// Output file path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and run the consistency checks without writing output.
    #[arg(long, conflicts_with = "dump")]
    check: bool,

    /// Log the parsed declarations and type tables without writing output.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bnd_ctypes=info")),
        )
        .init();

    let cli = Cli::parse();
    let diagnostics = if cli.check {
        bnd_ctypes::check(&cli.config)?
    } else if cli.dump {
        bnd_ctypes::dump(&cli.config)?
    } else {
        bnd_ctypes::run(&cli.config, cli.output.as_deref())?.1
    };

    let errors = diagnostics.error_count();
    if errors > 0 {
        eprintln!("{errors} error(s) reported");
    }
    Ok(ExitCode::from(diagnostics.exit_code()))
}
