//! Show Command
//!
//! Display the running configuration of a daemon, whole or one section.

use console::style;
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::types::Result;

pub async fn run(url: &str, section: Option<&str>, format: &str) -> Result<()> {
    let client = ApiClient::new(url);
    let json_output = format == "json";

    match section {
        Some(name) => {
            let data = client.section(name).await?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_section(name, &data);
            }
        }
        None => {
            let config = client.config().await?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else if let Value::Object(sections) = config {
                for (name, data) in &sections {
                    print_section(name, data);
                }
            }
        }
    }

    Ok(())
}

fn print_section(name: &str, data: &Value) {
    println!("\n{}", style(name).bold());
    println!("{}", "─".repeat(40));

    match data {
        Value::Object(fields) if fields.is_empty() => {
            println!("  {}", style("(empty)").dim());
        }
        Value::Object(fields) => {
            for (field, value) in fields {
                println!("  {}: {}", field, render(value));
            }
        }
        Value::Array(items) if items.is_empty() => {
            println!("  {}", style("(empty)").dim());
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                println!("  [{}] {}", index, render(item));
            }
        }
        other => println!("  {}", render(other)),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
