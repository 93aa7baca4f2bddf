mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simple_logger::SimpleLogger;
use transeq_core::{tables, translate};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cli::Args;

const IO_BUFFER: usize = 1024 * 1024;

fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
    match path.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("could not read from input file {}", path.display()))?;
            Ok(Box::new(BufReader::with_capacity(IO_BUFFER, file)))
        }
        _ => Ok(Box::new(BufReader::with_capacity(IO_BUFFER, io::stdin()))),
    }
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write + Send>> {
    match path.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::create(path)
                .with_context(|| format!("could not write to output file {}", path.display()))?;
            Ok(Box::new(BufWriter::with_capacity(IO_BUFFER, file)))
        }
        _ => Ok(Box::new(BufWriter::with_capacity(IO_BUFFER, io::stdout()))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(args.level.to_level_filter())
        .init()?;

    if args.list_tables {
        for code in tables() {
            println!("{:>3}  {}", code.id, code.name);
        }
        return Ok(());
    }

    info!("Starting transeq with args: {}", args);
    let start = Instant::now();

    let options = args.options();
    let input = open_input(&args.sequence)?;
    let output = open_output(&args.outseq)?;

    translate(input, output, &options).map_err(|err| {
        if err.is_config() {
            anyhow::Error::new(err).context("invalid configuration, try --help for details")
        } else {
            anyhow::Error::new(err)
        }
    })?;

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
