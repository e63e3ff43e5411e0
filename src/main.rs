use clap::Parser;
use flagdeck::presentation::{self, cli::Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    presentation::services::init_logging();

    let cli = Cli::parse();
    presentation::cli::run(cli).await
}
