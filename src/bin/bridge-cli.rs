use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use content_bridge::config::load_config;
use content_bridge::delivery::{DATA_EVENT, SERVICE_NAME};
use content_bridge::http::{PushReply, PushRequest};

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Operator CLI for content-bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5140")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and print the normalized [plugin] table
    Validate { path: PathBuf },
    /// Pull data from a running bridge
    Get {
        #[arg(short, long, default_value = SERVICE_NAME)]
        service: String,
    },
    /// Send one push request over WebSocket
    Push {
        #[arg(short, long, default_value = DATA_EVENT)]
        event: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => match load_config(&path) {
            Ok(loaded) => {
                println!("{}", serde_json::to_string_pretty(&loaded.client)?);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Get { service } => {
            let res = reqwest::get(format!("{}/data/{}", cli.url, service)).await?;
            print_response(res).await?;
        }
        Commands::Push { event } => {
            let reply = push(&cli.url, &event).await?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
    }

    Ok(())
}

async fn push(base_url: &str, event: &str) -> Result<PushReply, Box<dyn std::error::Error>> {
    let ws_url = format!("{}/ws", base_url.replacen("http", "ws", 1));
    let (mut stream, _) = connect_async(ws_url.as_str()).await?;

    let request = serde_json::to_string(&PushRequest { event: event.to_string() })?;
    stream.send(Message::Text(request.into())).await?;

    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => {
                let reply: PushReply = serde_json::from_str(text.as_str())?;
                let _ = stream.close(None).await;
                return Ok(reply);
            }
            Message::Close(_) => break,
            _ => continue,
        }
    }

    Err("connection closed before a reply arrived".into())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: bridge returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
