//! Validate an invoice draft from a JSON file and submit it.
//!
//! ```text
//! INVOICE_API_BASE=http://localhost:8080 cargo run --features http --example submit_invoice -- draft.json
//! ```

use invoice_total::core::*;
use invoice_total::submit::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: submit_invoice <draft.json>")?;
    let draft = InvoiceDraft::from_json(&std::fs::read_to_string(&path)?)?;

    let invoice = match draft.validate() {
        Ok(invoice) => invoice,
        Err(errors) => {
            println!("=== Invalid invoice ===\n");
            for error in &errors {
                println!("  {}: {}", error.field, error.message);
            }
            std::process::exit(1);
        }
    };

    println!(
        "Submitting {} line(s) dated {} in {}...",
        invoice.lines().len(),
        invoice.date(),
        invoice.currency()
    );

    let client = SubmissionClient::from_config(&ClientConfig::from_env()?)?;
    match client.submit_invoice(&invoice).await {
        Ok(total) => println!("Total: {total}"),
        Err(e) => {
            eprintln!("{}", e.message());
            std::process::exit(2);
        }
    }

    Ok(())
}
