//! HTTP routes
//!
//! Every path and method is handled the same way: the body is decoded as
//! an envelope, its PNG is drawn, and the outcome is answered as
//! `{"resp":"ok"}` or `{"resp":"err"}` with HTTP 200. The envelope's
//! `cmd` is logged but not interpreted.

use std::io;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::panel::{PanelError, SharedPanel};

/// Largest accepted request body
const BODY_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    cmd: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub resp: String,
}

impl Reply {
    pub fn ok() -> Self {
        Self { resp: "ok".into() }
    }

    pub fn err() -> Self {
        Self { resp: "err".into() }
    }
}

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("bad envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("bad image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("bad PNG: {0}")]
    Image(#[from] image::ImageError),
    #[error("panel: {0}")]
    Panel(#[from] PanelError),
}

/// Decode one request body and draw its image
pub fn handle_body(panel: &SharedPanel, body: &[u8]) -> Result<(), ShowError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    let png = STANDARD.decode(envelope.data.as_bytes())?;
    debug!(cmd = %envelope.cmd, bytes = png.len(), "image received");

    let img = image::load_from_memory_with_format(&png, ImageFormat::Png)?;
    panel.lock().draw(&img)?;
    Ok(())
}

async fn show(State(panel): State<SharedPanel>, body: Bytes) -> Json<Reply> {
    // Panel refreshes block for seconds on hardware
    let outcome = tokio::task::spawn_blocking(move || handle_body(&panel, &body)).await;

    match outcome {
        Ok(Ok(())) => {
            info!("image shown");
            Json(Reply::ok())
        }
        Ok(Err(e)) => {
            warn!(error = %e, "image rejected");
            Json(Reply::err())
        }
        Err(e) => {
            warn!(error = %e, "draw task failed");
            Json(Reply::err())
        }
    }
}

pub fn router(panel: SharedPanel) -> Router {
    Router::new()
        .fallback(show)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(panel)
}

/// Serve requests on `listener` until the task is dropped
pub async fn serve(listener: TcpListener, panel: SharedPanel) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "e-ink server listening");
    }
    axum::serve(listener, router(panel)).await
}
