//! Remote e-ink display service
//!
//! The kiosk pushes every scan artifact here as one HTTP request:
//!
//! ```text
//! POST /   {"cmd":"swish","data":"<base64 PNG>"}
//!     ──▶  {"resp":"ok"}    image drawn
//!     ──▶  {"resp":"err"}   body, image or panel failure
//! ```
//!
//! The reply is always HTTP 200; the outcome is carried in `resp`.
//!
//! - [`panel`]: the black/white panel framebuffer the images are drawn into
//! - [`server`]: envelope decoding and the HTTP routes

pub mod panel;
pub mod server;

pub use panel::{EinkPanel, PanelError, SharedPanel};
pub use server::{handle_body, router, serve, Reply, ShowError};
