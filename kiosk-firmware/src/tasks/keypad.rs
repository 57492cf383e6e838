//! Keypad polling task
//!
//! Samples the keypad lines at the configured interval and forwards key
//! codes to the controller. Codes are not interpreted here; unassigned
//! codes are the controller's to reject.

use embassy_time::{Duration, Instant, Ticker};
use tracing::{info, trace};

use kiosk_drivers::Keypad;
use kiosk_hal_console::{ConsoleEdge, ConsoleLine};

use crate::channels::KEY_CHANNEL;

/// Keypad wired to the console line bank
pub type ConsoleKeypad = Keypad<ConsoleLine, ConsoleEdge>;

#[embassy_executor::task]
pub async fn keypad_task(mut keypad: ConsoleKeypad, poll_interval_ms: u32) {
    info!(poll_interval_ms, "Keypad task started");

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let mut reported_bounces = 0;

    loop {
        let now_ms = Instant::now().as_millis();
        while let Some(code) = keypad.poll(now_ms) {
            trace!(code = code.0, "key");
            KEY_CHANNEL.send(code).await;
        }

        if keypad.bounces() != reported_bounces {
            reported_bounces = keypad.bounces();
            trace!(total = reported_bounces, "select bounce ignored");
        }

        ticker.next().await;
    }
}
