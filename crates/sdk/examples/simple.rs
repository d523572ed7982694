//! Simple SDK Example
//!
//! Marks a class for discard, checks a job against it, then cleans up.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package disposal-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package disposal-sdk --example simple
//!    ```

use disposal_sdk::{DisposalAdminClient, TargetRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Job Disposal SDK - Simple Example");
    println!("=================================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = DisposalAdminClient::connect("http://127.0.0.1:9528").await?;
    println!("   ✓ Connected\n");

    // 2. Mark a class for discard
    println!("2. Marking NightlyReportJob for discard...");
    let marked = client.mark("discard", "class", "NightlyReportJob").await?;
    println!("   ✓ Marked: {:?}\n", marked.marker);

    // 3. Ask what would happen to a job of that class
    println!("3. Checking a queued job...");
    let target = client
        .target(&TargetRequest {
            jid: Some("2f9c0d1e".to_string()),
            class: Some("NightlyReportJob".to_string()),
            ..Default::default()
        })
        .await?;
    println!(
        "   ✓ Disposal method: {}\n",
        target.disposal_method.as_deref().unwrap_or("none")
    );

    // 4. List and clean up
    println!("4. Current discard markers:");
    for entry in client.markers("discard").await?.markers {
        println!("     - {}", entry.marker);
    }
    client.unmark("discard", "class", "NightlyReportJob").await?;
    println!("   ✓ Unmarked\n");

    println!("✓ Example completed successfully!");
    Ok(())
}
