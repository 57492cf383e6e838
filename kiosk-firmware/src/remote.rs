//! Remote e-ink display client
//!
//! Pushes PNG images to the display server as a JSON envelope over HTTP.
//! The server answers `{"resp":"ok"}` once the panel has been updated,
//! which takes several seconds, so every push runs on its own thread and
//! reports back through [`RENDER_DONE`].

use std::io;
use std::thread;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use kiosk_core::config::RemoteDisplayConfig;
use kiosk_core::error::{ErrorCode, ErrorInfo};

use crate::artifact::PngImage;
use crate::channels::{post_blocking, RENDER_DONE};

/// Envelope command for showing an image
const SHOW_IMAGE_CMD: &str = "swish";

/// Reply body on success
const RESP_OK: &str = "ok";

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    cmd: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct Reply {
    resp: String,
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Transport>),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("unreadable reply: {0}")]
    Body(#[from] io::Error),
    #[error("malformed reply: {0}")]
    Json(#[from] serde_json::Error),
    #[error("display refused image: {0:?}")]
    Refused(String),
}

impl From<ureq::Error> for PushError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => PushError::Status(code),
            ureq::Error::Transport(t) => PushError::Transport(Box::new(t)),
        }
    }
}

/// Serialize an image into the push envelope
fn envelope(png: &[u8]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        cmd: SHOW_IMAGE_CMD,
        data: STANDARD.encode(png),
    })
}

/// Check the server's reply body
fn check_reply(body: &str) -> Result<(), PushError> {
    let reply: Reply = serde_json::from_str(body)?;
    if reply.resp == RESP_OK {
        Ok(())
    } else {
        Err(PushError::Refused(reply.resp))
    }
}

/// HTTP client for the remote display
#[derive(Clone)]
pub struct RemoteDisplay {
    agent: ureq::Agent,
    url: String,
}

impl RemoteDisplay {
    pub fn new(config: &RemoteDisplayConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms as u64))
            .build();
        Self {
            agent,
            url: format!("http://{}:{}/", config.host, config.port),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Push one image and wait for the display to confirm it
    pub fn send(&self, png: &[u8]) -> Result<(), PushError> {
        let body = envelope(png)?;
        debug!(url = %self.url, bytes = body.len(), "pushing image");

        let reply = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body)?
            .into_string()?;
        check_reply(&reply)
    }

    /// Start a push on a worker thread
    ///
    /// The outcome is posted to [`RENDER_DONE`]. Failing to start the
    /// thread is returned directly and nothing is posted.
    pub fn spawn_push(&self, image: PngImage) -> io::Result<()> {
        let client = self.clone();
        thread::Builder::new()
            .name("render-push".into())
            .spawn(move || {
                let result = client.send(&image.0).map_err(|e| {
                    warn!(url = %client.url, error = %e, "render push failed");
                    ErrorInfo::new(ErrorCode::RenderPush, format_args!("render push: {}", e))
                });
                if result.is_ok() {
                    info!("remote display updated");
                }
                post_blocking(&RENDER_DONE, result);
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::QrRenderer;
    use kiosk_core::config::KioskConfig;
    use kiosk_eink_server::{serve, EinkPanel, SharedPanel};

    #[test]
    fn test_envelope_format() {
        let json = envelope(&[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(json, r#"{"cmd":"swish","data":"iVBORw=="}"#);
    }

    #[test]
    fn test_reply_checks() {
        assert!(check_reply(r#"{"resp":"ok"}"#).is_ok());
        assert!(matches!(
            check_reply(r#"{"resp":"busy"}"#),
            Err(PushError::Refused(r)) if r == "busy"
        ));
        assert!(matches!(check_reply("<html>"), Err(PushError::Json(_))));
        assert!(matches!(check_reply("{}"), Err(PushError::Json(_))));
    }

    #[test]
    fn test_url_from_config() {
        let remote = RemoteDisplay::new(&KioskConfig::default().remote_display);
        assert_eq!(remote.url(), "http://192.168.1.186:7760/");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let mut config = KioskConfig::default().remote_display;
        config.host = kiosk_core::error::bounded("127.0.0.1");
        config.port = 9;
        config.timeout_ms = 500;
        let err = RemoteDisplay::new(&config).send(b"png").unwrap_err();
        assert!(matches!(err, PushError::Transport(_)));
    }

    /// Start an e-ink server on a loopback port
    fn eink_server() -> (RemoteDisplay, SharedPanel) {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let port = listener.local_addr().unwrap().port();

        let panel = SharedPanel::new(EinkPanel::new(400, 300));
        let served = panel.clone();
        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let _ = serve(listener, served).await;
            });
        });

        let mut config = KioskConfig::default().remote_display;
        config.host = kiosk_core::error::bounded("127.0.0.1");
        config.port = port;
        config.timeout_ms = 5000;
        (RemoteDisplay::new(&config), panel)
    }

    #[test]
    fn test_push_to_eink_server() {
        let config = KioskConfig::default();
        let png = QrRenderer::new(&config.payment, &config.remote_display)
            .render_payment(120)
            .unwrap();

        let (remote, panel) = eink_server();
        remote.send(&png.0).unwrap();
        assert_eq!(panel.lock().frames(), 1);

        let err = remote.send(b"not a png").unwrap_err();
        assert!(matches!(err, PushError::Refused(r) if r == "err"));
        assert_eq!(panel.lock().frames(), 1);
    }
}
