use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};

use next_close::config::{PREDICTION, SERVER};

/// Send one prediction request to a running service and print the reply.
#[derive(Parser, Debug)]
struct Args {
    /// Full URL of the prediction endpoint
    #[arg(long)]
    url: Option<String>,

    #[arg(long, default_value = PREDICTION.default_ticker)]
    ticker: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let url = args
        .url
        .unwrap_or_else(|| format!("http://{}:{}/predict", SERVER.host, SERVER.port));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .post(&url)
        .json(&json!({ "ticker": args.ticker }))
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    let text = response.text().await.context("Failed to read response body")?;
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => println!("{body}"),
        Err(_) => println!("Failed to decode JSON. Response content: {text}"),
    }
    Ok(())
}
