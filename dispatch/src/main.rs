use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use streetfind::batch;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "dispatch")]
#[command(about = "Answer nearest-street queries over an address batch", long_about = None)]
struct Cli {
    /// Batch input file (addresses then queries); reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Where to write answers; writes stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // stdout carries the answers, so logs go to stderr.
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = batch::run(input, output)?;
    tracing::debug!(?summary, "done");
    Ok(())
}
