//! Job Disposal CLI - operator interface for marking queued jobs
//! Talks JSON-RPC to the daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9528";

const DISPOSAL_METHODS: [&str; 2] = ["kill", "discard"];
const MARKER_TYPES: [&str; 3] = ["jid", "bid", "class"];

#[derive(Parser)]
#[command(name = "disposal")]
#[command(about = "Mark enqueued jobs to be killed or discarded when picked up", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "DISPOSAL_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Mark jobs for disposal
    Mark {
        /// Disposal method
        #[arg(value_parser = DISPOSAL_METHODS)]
        method: String,

        /// Marker type
        #[arg(value_parser = MARKER_TYPES)]
        marker_type: String,

        /// Job id, batch id or class name
        value: String,
    },

    /// Remove a disposal marker
    Unmark {
        #[arg(value_parser = DISPOSAL_METHODS)]
        method: String,

        #[arg(value_parser = MARKER_TYPES)]
        marker_type: String,

        value: String,
    },

    /// Remove every marker of one disposal method
    UnmarkAll {
        #[arg(value_parser = DISPOSAL_METHODS)]
        method: String,
    },

    /// List markers of one disposal method
    Markers {
        #[arg(value_parser = DISPOSAL_METHODS)]
        method: String,
    },

    /// Show which disposal method a job would get
    Check {
        #[arg(long)]
        jid: Option<String>,

        #[arg(long)]
        bid: Option<String>,

        #[arg(long)]
        class: Option<String>,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct MarkerRow {
    marker: String,
    #[tabled(display_with = "display_optional")]
    marker_type: Option<String>,
    #[tabled(display_with = "display_optional")]
    value: Option<String>,
}

fn display_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mark {
            method,
            marker_type,
            value,
        } => {
            let params = json!({
                "method": method,
                "marker_type": marker_type,
                "value": value,
            });

            let result = call_rpc(&cli.rpc_url, "disposal.mark.v1", params).await?;

            if result["marked"].as_bool().unwrap_or(false) {
                println!(
                    "{}",
                    format!("✓ Marked {} for {}", result["marker"].as_str().unwrap_or(&value), method)
                        .green()
                        .bold()
                );
            } else {
                println!("{}", "○ Empty value, nothing marked".yellow());
            }
        }

        Commands::Unmark {
            method,
            marker_type,
            value,
        } => {
            let params = json!({
                "method": method,
                "marker_type": marker_type,
                "value": value,
            });

            let result = call_rpc(&cli.rpc_url, "disposal.unmark.v1", params).await?;

            if result["unmarked"].as_bool().unwrap_or(false) {
                println!(
                    "{}",
                    format!("✓ Unmarked {} from {}", result["marker"].as_str().unwrap_or(&value), method)
                        .green()
                        .bold()
                );
            } else {
                println!("{}", "○ Empty value, nothing unmarked".yellow());
            }
        }

        Commands::UnmarkAll { method } => {
            call_rpc(&cli.rpc_url, "disposal.unmark_all.v1", json!({ "method": method })).await?;

            println!("{}", format!("✓ All {} markers removed", method).green().bold());
        }

        Commands::Markers { method } => {
            let result = call_rpc(&cli.rpc_url, "disposal.markers.v1", json!({ "method": method })).await?;
            let rows: Vec<MarkerRow> = serde_json::from_value(result["markers"].clone())
                .context("Unexpected markers payload")?;

            println!("{}", format!("{} markers ({})", method, rows.len()).cyan().bold());
            if rows.is_empty() {
                println!("{}", "No markers".yellow());
            } else {
                println!("{}", Table::new(rows));
            }
        }

        Commands::Check { jid, bid, class } => {
            if jid.is_none() && bid.is_none() && class.is_none() {
                anyhow::bail!("Provide at least one of --jid, --bid, --class");
            }

            let params = json!({
                "jid": jid,
                "bid": bid,
                "class": class,
            });

            let result = call_rpc(&cli.rpc_url, "disposal.target.v1", params).await?;

            match result["disposal_method"].as_str() {
                Some("kill") => println!("{}", "KILL: job will be sent to the dead set".red().bold()),
                Some("discard") => {
                    println!("{}", "DISCARD: job will be dropped silently".yellow().bold())
                }
                Some(other) => println!("{}", other),
                None => println!("{}", "ALLOWED: job is not marked".green().bold()),
            }
        }
    }

    Ok(())
}
