//! Health Command
//!
//! Check whether a daemon is up and answering.

use console::style;
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::types::Result;

pub async fn run(url: &str) -> Result<()> {
    let client = ApiClient::new(url);
    let health = client.health().await?;

    let service = health
        .get("service")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    println!("{} {} is healthy at {}", style("✓").green(), service, url);

    Ok(())
}
