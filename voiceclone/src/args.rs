use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Voice cloning gateway
#[derive(Debug, Parser)]
#[command(name = "voiceclone", about = "HTTP gateway forwarding voice cloning requests to an external provider")]
pub struct Args {
    /// Path to configuration file; a missing file means default settings
    #[arg(short, long, default_value = "voiceclone.toml", env = "VOICECLONE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOICECLONE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when neither `RUST_LOG` nor the config sets one
    #[arg(long, default_value = "info", env = "VOICECLONE_LOG")]
    pub log: String,
}
