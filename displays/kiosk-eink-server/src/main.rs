//! Kiosk E-ink Server
//!
//! Receives images from the kiosk over HTTP and draws them on the
//! remote e-ink panel. Without a panel attached, each frame is written
//! to `--output` instead.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::fmt::time::UtcTime;

use kiosk_eink_server::panel::{PANEL_HEIGHT, PANEL_WIDTH};
use kiosk_eink_server::{serve, EinkPanel, SharedPanel};

#[derive(Debug, Parser)]
#[command(version, about = "Remote e-ink display server for the kiosk")]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0:7760")]
    bind: SocketAddr,

    #[arg(long, default_value_t = PANEL_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = PANEL_HEIGHT)]
    height: u32,

    /// Write every drawn frame to this PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut panel = EinkPanel::new(args.width, args.height);
    if let Some(path) = args.output {
        info!(path = %path.display(), "writing frames to file");
        panel = panel.with_output(path);
    }

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    serve(listener, SharedPanel::new(panel))
        .await
        .context("serving requests")
}
