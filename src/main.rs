use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Point2;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use track_reward_server::config::{DEFAULT_BIND, DEFAULT_LOG_FILTER, ServerConfig};
use track_reward_server::net::start_websocket_server;
use track_reward_server::session::SharedSessionState;
use track_reward_server::side_zone::{evaluate, evaluate_params};
use track_reward_server::track::{Centerline, TrackFile};

#[derive(Parser, Debug)]
#[command(name = "track-reward-server", about = "Side-of-track reward for driving RL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve rewards over WebSocket
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Score one params object (JSON argument, or stdin when omitted)
    Eval { params: Option<String> },
    /// Derive the track state for a position on a track file and score it
    Locate {
        #[arg(long)]
        track: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Serve { bind } => {
            info!("🚀 Starting track reward server...");
            let state = Arc::new(Mutex::new(SharedSessionState::new()));
            start_websocket_server(ServerConfig::new(bind), state)
                .await
                .with_context(|| format!("serving on {bind}"))?;
        }

        Command::Eval { params } => {
            let raw = match params {
                Some(p) => p,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading params from stdin")?;
                    buf
                }
            };
            let params: Value = serde_json::from_str(&raw).context("parsing params json")?;
            let reward = evaluate_params(&params)?;
            println!("{reward}");
        }

        Command::Locate { track, x, y } => {
            let file = TrackFile::load(&track)?;
            let centerline = Centerline::new(file.waypoints)?;
            info!("Loaded track with {} waypoints", centerline.len());

            let state = centerline.track_state(Point2::new(x, y));
            let reward = evaluate(&state)?;
            println!(
                "{}",
                json!({
                    "is_left_of_center": state.is_left_of_center,
                    "closest_waypoints": state.closest_waypoints,
                    "reward": reward,
                })
            );
        }
    }

    Ok(())
}
