use anyhow::Result;
use clap::Parser;
use rainbow_table::cli::{
    execute_generate, execute_lookup, init_tracing, render_failure, Cli, Commands, GenerateOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let started_at = chrono::Local::now();
    tracing::info!(started_at = %started_at.format("%Y-%m-%d %H:%M:%S"), "started");

    let result = match cli.command {
        Commands::Generate {
            wordlist,
            folder,
            output,
            use_database,
            algorithm,
            iterations,
            chunk_size,
            workers,
            quiet,
            json,
        } => {
            execute_generate(GenerateOptions {
                wordlist,
                folder,
                output,
                use_database,
                algorithm,
                iterations,
                chunk_size,
                workers,
                quiet,
                json,
            })
            .await
        }
        Commands::Lookup {
            digest,
            output,
            use_database,
        } => execute_lookup(&digest, output, use_database).await.map(|_| ()),
    };

    let finished_at = chrono::Local::now();
    tracing::info!(
        finished_at = %finished_at.format("%Y-%m-%d %H:%M:%S"),
        elapsed_ms = (finished_at - started_at).num_milliseconds(),
        "finished"
    );

    if let Err(error) = result {
        eprint!("{}", render_failure(&error));
        std::process::exit(1);
    }

    Ok(())
}
