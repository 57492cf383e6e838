//! Panel framebuffer
//!
//! Models a 400x300 Inky wHAT. Incoming images are thresholded to black
//! and white and drawn from the top-left corner; anything outside the
//! panel is clipped. Each drawn frame can also be written out as a PNG
//! so the panel can be inspected on a host without the hardware.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use thiserror::Error;
use tracing::debug;

/// Inky wHAT resolution
pub const PANEL_WIDTH: u32 = 400;
pub const PANEL_HEIGHT: u32 = 300;

/// Luma values at or below this are drawn black
const BLACK_THRESHOLD: u8 = 127;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("image is empty")]
    EmptyImage,
    #[error("failed to write frame: {0}")]
    Output(#[from] image::ImageError),
}

pub struct EinkPanel {
    frame: GrayImage,
    output: Option<PathBuf>,
    frames: u32,
}

impl EinkPanel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: GrayImage::from_pixel(width, height, WHITE),
            output: None,
            frames: 0,
        }
    }

    /// Also write every drawn frame to `path`
    pub fn with_output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }

    pub fn frame(&self) -> &GrayImage {
        &self.frame
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Replace the panel contents with `img`
    pub fn draw(&mut self, img: &DynamicImage) -> Result<(), PanelError> {
        if img.width() == 0 || img.height() == 0 {
            return Err(PanelError::EmptyImage);
        }

        let gray = img.to_luma8();
        for (x, y, pixel) in self.frame.enumerate_pixels_mut() {
            *pixel = match gray.get_pixel_checked(x, y) {
                Some(Luma([v])) if *v <= BLACK_THRESHOLD => BLACK,
                _ => WHITE,
            };
        }
        self.frames += 1;
        debug!(
            frame = self.frames,
            width = img.width(),
            height = img.height(),
            "panel refreshed"
        );

        if let Some(path) = &self.output {
            self.frame.save_with_format(path, ImageFormat::Png)?;
        }
        Ok(())
    }
}

/// Panel shared between request handlers
#[derive(Clone)]
pub struct SharedPanel(Arc<Mutex<EinkPanel>>);

impl SharedPanel {
    pub fn new(panel: EinkPanel) -> Self {
        Self(Arc::new(Mutex::new(panel)))
    }

    pub fn lock(&self) -> MutexGuard<'_, EinkPanel> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
