use anyhow::Result;
use network_gpt::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Provider keys usually live in a local .env during development
    dotenvy::dotenv().ok();
    cli::run().await
}
