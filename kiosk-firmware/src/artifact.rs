//! Scan artifact rendering
//!
//! Builds the payment payload and draws QR codes onto a white canvas the
//! size of the remote e-ink panel, encoded as PNG.

use std::fmt::Write as _;
use std::io::Cursor;

use image::{imageops, GrayImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;
use tracing::debug;

use kiosk_core::config::{PaymentConfig, RemoteDisplayConfig, QR_LEFT_MARGIN};

/// Encoded PNG image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage(pub Vec<u8>);

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Escape text for use as one URL path segment
///
/// Unreserved characters and `$&+:=@` pass through; everything else,
/// including the `;` payload separator, is percent-encoded byte by byte.
pub fn path_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'.' | b'_' | b'~' => out.push(byte as char),
            b'$' | b'&' | b'+' | b':' | b'=' | b'@' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// Renders payment and identification QR codes
#[derive(Debug, Clone)]
pub struct QrRenderer {
    width: u32,
    height: u32,
    phone: String,
    message: String,
    mask: String,
}

impl QrRenderer {
    pub fn new(payment: &PaymentConfig, remote: &RemoteDisplayConfig) -> Self {
        Self {
            width: remote.width as u32,
            height: remote.height as u32,
            phone: payment.phone.as_str().to_string(),
            message: payment.message.as_str().to_string(),
            mask: payment.mask.as_str().to_string(),
        }
    }

    /// Payment request payload for `amount`
    pub fn payment_payload(&self, amount: u16) -> String {
        format!(
            "C{};{};{};{}",
            self.phone,
            amount,
            path_escape(&self.message),
            self.mask
        )
    }

    /// Draw `payload` as a QR code on the panel canvas
    pub fn render(&self, payload: &str) -> Result<PngImage, ArtifactError> {
        let code = QrCode::with_error_correction_level(payload, EcLevel::L)?;
        let qr = code
            .render::<Luma<u8>>()
            .max_dimensions(self.height, self.height)
            .build();

        let mut canvas = GrayImage::from_pixel(self.width, self.height, Luma([255]));
        imageops::overlay(&mut canvas, &qr, QR_LEFT_MARGIN as i64, 0);

        let mut png = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        debug!(
            qr_px = qr.width(),
            bytes = png.len(),
            "rendered scan artifact"
        );
        Ok(PngImage(png))
    }

    pub fn render_payment(&self, amount: u16) -> Result<PngImage, ArtifactError> {
        self.render(&self.payment_payload(amount))
    }
}
