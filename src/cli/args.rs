use crate::digest::DigestAlgorithm;
use crate::services::DEFAULT_CHUNK_SIZE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rainbow_table")]
#[command(about = "A tool for generating rainbow tables from wordlists")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash every word of the wordlist(s) and store digest/word pairs
    Generate {
        /// Wordlist file, or a folder of *.txt wordlists with --folder
        wordlist: PathBuf,

        /// Treat WORDLIST as a folder and use every *.txt file inside it
        #[arg(long)]
        folder: bool,

        /// Output base name (.txt or .db is appended)
        #[arg(short, long, default_value = "rainbow")]
        output: PathBuf,

        /// Store results in a SQLite database instead of a flat file
        #[arg(short = 'd', long)]
        use_database: bool,

        /// Digest algorithm
        #[arg(short = 'a', long, value_enum, default_value_t = DigestAlgorithm::Md5)]
        algorithm: DigestAlgorithm,

        /// Hash iterations (accepted, currently not applied)
        #[arg(short = 'i', long, default_value = "1")]
        iterations: u32,

        /// Words per work unit
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Number of hash workers (default: CPU count - 1)
        #[arg(short = 'w', long)]
        workers: Option<usize>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the word for a digest in a generated table
    Lookup {
        /// Hex digest to search for
        digest: String,

        /// Output base name the table was generated with
        #[arg(short, long, default_value = "rainbow")]
        output: PathBuf,

        /// Search the SQLite database instead of the flat file
        #[arg(short = 'd', long)]
        use_database: bool,
    },
}
