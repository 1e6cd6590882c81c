//! portfolio-server – entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    portfolio_server::run().await
}
