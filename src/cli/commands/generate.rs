use crate::digest::DigestAlgorithm;
use crate::engine::{generate_rainbow_table, RunRequest};
use crate::services::{ConsoleProgressReporter, DefaultPipelineConfig, OutputKind, OutputTarget};
use anyhow::Result;
use std::path::PathBuf;

/// Configuration struct for generate command to reduce argument count
pub struct GenerateOptions {
    pub wordlist: PathBuf,
    pub folder: bool,
    pub output: PathBuf,
    pub use_database: bool,
    pub algorithm: DigestAlgorithm,
    pub iterations: u32,
    pub chunk_size: usize,
    pub workers: Option<usize>,
    pub quiet: bool,
    pub json: bool,
}

impl GenerateOptions {
    fn request(&self) -> Result<RunRequest> {
        let target = OutputTarget::new(
            &self.output,
            OutputKind::from_use_database(self.use_database),
        );

        let request = if self.folder {
            RunRequest::from_folder(&self.wordlist, self.algorithm, target)?
        } else {
            RunRequest::new(vec![self.wordlist.clone()], self.algorithm, target)?
        };
        Ok(request)
    }

    fn config(&self) -> DefaultPipelineConfig {
        let silent = self.quiet || self.json;
        let config = DefaultPipelineConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_iterations(self.iterations)
            .with_progress_reporting(!silent);

        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }
}

/// Execute generate command
pub async fn execute_generate(options: GenerateOptions) -> Result<()> {
    let request = options.request()?;
    let config = options.config();

    let reporter = if options.quiet || options.json {
        ConsoleProgressReporter::quiet()
    } else {
        println!("🚀 Rainbow table generator");
        println!("📂 Wordlists: {}", request.wordlists.len());
        println!("🔑 Algorithm: {}", request.algorithm);
        println!("📄 Output: {}", request.output.path().display());
        ConsoleProgressReporter::new()
    };

    let summary = generate_rainbow_table(&request, config, reporter).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
