use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod ask;
pub mod chat;
pub mod providers;
pub mod serve;

use ask::parse_media;

use crate::chat::MediaAttachment;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "3000")]
        port: String,
    },
    /// Start an interactive chat session in the terminal
    Chat {},
    /// Send a single message and print the JSON reply
    Ask {
        #[arg(long, default_value = "")]
        message: String,

        /// Attach media metadata as `name:type`, repeatable
        #[arg(long, value_parser = parse_media)]
        media: Vec<MediaAttachment>,
    },
    /// List the providers that will be tried, in order
    Providers {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat {}) => {
            chat::run().await?;
        }
        Some(Command::Ask { message, media }) => {
            ask::run(&message, media).await?;
        }
        Some(Command::Providers {}) => {
            providers::run();
        }
        None => {}
    }

    Ok(())
}
