use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mastermind::cli::run_cli().await
}
