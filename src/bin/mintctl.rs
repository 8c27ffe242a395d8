//! mintctl - command-line client for mintd
//!
//! Drives the same form flow as the web UI: generate an image from a
//! prompt, then publish it with a name and description.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand};
use mintd::client::MintClient;
use mintd::form::{ActionState, FormState, ViewState};
use mintd::mint::decode_image;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// mintd command-line client
#[derive(Parser, Debug)]
#[command(name = "mintctl", version, about = "Generate and publish NFT images via mintd")]
struct Args {
    /// mintd base URL
    #[arg(long, default_value = "http://localhost:8000")]
    server: String,

    /// IPFS gateway used for printed links
    #[arg(long, default_value = mintd::pinata::DEFAULT_GATEWAY_URL)]
    gateway: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an image from a prompt and save it as PNG
    Generate {
        #[arg(short, long)]
        prompt: String,

        /// Output file
        #[arg(short, long, default_value = "image.png")]
        out: PathBuf,
    },

    /// Publish an image with metadata to IPFS
    Mint {
        /// Image file to publish
        #[arg(short, long)]
        image: PathBuf,

        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mintd=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = MintClient::new(&args.server);
    let mut form = FormState::new(&args.gateway);

    match args.command {
        Command::Generate { prompt, out } => {
            form.prompt = prompt;
            let request = form.begin_generation();
            let result = client.generate(&request).await;
            if let Err(e) = &result {
                eprintln!("{}", e);
            }
            form.finish_generation(result);

            match form.view() {
                ViewState::HasResult => {
                    let encoded = &form.images()[0];
                    let bytes = decode_image(encoded).context("server returned invalid base64")?;
                    std::fs::write(&out, bytes)
                        .with_context(|| format!("Failed to write {}", out.display()))?;
                    println!("Saved generated image to {}", out.display());
                }
                ViewState::Error(message) => bail!(message),
                ViewState::Empty | ViewState::Loading => bail!("No images generated yet."),
            }
        }

        Command::Mint {
            image,
            name,
            description,
        } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read {}", image.display()))?;
            form.load_images(vec![BASE64.encode(bytes)]);
            form.name = name;
            form.description = description;

            let request = form.begin_publication()?;
            let result = client.mint(&request).await.map_err(|e| e.to_string());
            form.finish_publication(result);

            match form.published() {
                Some(published) => {
                    println!("NFT Metadata successfully created!");
                    println!("Image CID: {}", published.image_cid);
                    println!("Link to NFT Image: {}", published.image_link);
                    println!("Metadata CID: {}", published.metadata_cid);
                    println!("Link to NFT Metadata: {}", published.metadata_link);
                    println!();
                    println!("{}", published.csv);
                }
                None => match form.publication() {
                    ActionState::Error(message) => bail!("Failed to create NFT: {}", message),
                    state => bail!("Failed to create NFT ({:?})", state),
                },
            }
        }
    }

    Ok(())
}
