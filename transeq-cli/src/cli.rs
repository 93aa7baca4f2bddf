use clap::{ArgAction, Parser};
use log::Level;
use transeq_core::{FrameSpec, OnInvalid, TranslateOptions};

use std::{fmt, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "transeq",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Nucleotide FASTA input, `-` or absent for stdin
    #[arg(short = 's', long)]
    pub sequence: Option<PathBuf>,

    /// Protein FASTA output, `-` or absent for stdout
    #[arg(short = 'o', long)]
    pub outseq: Option<PathBuf>,

    /// Frame(s) to translate: 1, 2, 3, F (forward three), -1, -2, -3, R (reverse three), 6 (all)
    #[arg(short = 'f', long, default_value = "1", allow_hyphen_values = true)]
    pub frame: FrameSpec,

    /// NCBI genetic code table, 0 is the standard code (see --list-tables)
    #[arg(short = 't', long, default_value = "0")]
    pub table: u32,

    /// Replace stop codon '*' by 'X'
    #[arg(short = 'c', long, default_value = "false", action = ArgAction::SetTrue)]
    pub clean: bool,

    /// Define frame '-1' as using the set of codons starting with the last codon of the sequence
    #[arg(short = 'a', long, default_value = "false", action = ArgAction::SetTrue)]
    pub alternative: bool,

    /// Remove trailing 'X' and '*' characters from each translated frame
    #[arg(short = 'T', long, default_value = "false", action = ArgAction::SetTrue)]
    pub trim: bool,

    /// Number of worker threads, 0 uses every available CPU
    #[arg(short = 'n', long, default_value = "0")]
    pub numcpu: usize,

    /// Fail on nucleotide characters outside ACGTUN instead of translating them as N
    #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
    pub strict: bool,

    /// Print the supported genetic code tables and exit
    #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
    pub list_tables: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

impl Args {
    pub fn options(&self) -> TranslateOptions {
        TranslateOptions {
            frame: self.frame,
            table: self.table,
            clean: self.clean,
            alternative: self.alternative,
            trim: self.trim,
            workers: self.numcpu,
            on_invalid: if self.strict {
                OnInvalid::Raise
            } else {
                OnInvalid::Warn
            },
            ..TranslateOptions::default()
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "-".to_string(),
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sequence={}, outseq={}, frame={}, table={}, clean={}, alternative={}, trim={}, numcpu={}, strict={}, level={}",
            display_path(&self.sequence),
            display_path(&self.outseq),
            self.frame,
            self.table,
            self.clean,
            self.alternative,
            self.trim,
            self.numcpu,
            self.strict,
            self.level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["transeq"]).unwrap();
        let options = args.options();
        assert_eq!(options.frame, FrameSpec::One);
        assert_eq!(options.table, 0);
        assert_eq!(options.workers, 0);
        assert_eq!(options.on_invalid, OnInvalid::Warn);
        assert!(!options.clean && !options.trim && !options.alternative);
    }

    #[test]
    fn negative_frame_and_flags() {
        let args = Args::try_parse_from([
            "transeq", "-s", "in.fna", "-o", "out.faa", "-f", "-2", "-t", "11", "-c", "-a", "-T",
            "-n", "4", "--strict",
        ])
        .unwrap();
        let options = args.options();
        assert_eq!(options.frame, FrameSpec::MinusTwo);
        assert_eq!(options.table, 11);
        assert!(options.clean && options.alternative && options.trim);
        assert_eq!(options.workers, 4);
        assert_eq!(options.on_invalid, OnInvalid::Raise);
        assert_eq!(args.sequence, Some(PathBuf::from("in.fna")));
    }

    #[test]
    fn bad_frame_is_rejected() {
        assert!(Args::try_parse_from(["transeq", "-f", "7"]).is_err());
    }
}
