//! binscout - binary inventory for your PATH.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    binscout_cli::run().await
}
