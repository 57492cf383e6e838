//! Display task
//!
//! Sole owner of the character display. Applies queued commands strictly
//! in order and repaints the console once the queue has drained.

use std::io::Stdout;

use tracing::{debug, info, warn};

use kiosk_display::sink::Applied;
use kiosk_display::DisplaySink;
use kiosk_hal_console::ConsoleLcd;

use crate::channels::DISPLAY_CHANNEL;

/// Display sink on the console LCD
pub type ConsoleSink = DisplaySink<ConsoleLcd<Stdout>>;

#[embassy_executor::task]
pub async fn display_task(mut sink: ConsoleSink) {
    info!("Display task started");

    loop {
        let cmd = DISPLAY_CHANNEL.receive().await;
        match sink.apply(&cmd) {
            Ok(Applied::Done) => {}
            Ok(Applied::Ignored) => debug!(?cmd, "display command ignored"),
            Err(e) => warn!(?cmd, error = ?e, "display command failed"),
        }

        // Repaint whole screens, not every intermediate command
        if DISPLAY_CHANNEL.is_empty() {
            if let Err(e) = sink.display_mut().present() {
                warn!(error = %e, "console repaint failed");
            }
        }
    }
}
