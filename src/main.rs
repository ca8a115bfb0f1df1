use clap::Parser;
use voice_greeter::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so file logs are flushed on exit
    let _guard = voice_greeter::logging::init(cli.config.log_file.as_deref());

    run(cli).await
}
