//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks
//! and the OS threads that do blocking work for them.

use std::thread;
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use kiosk_core::error::ErrorInfo;
use kiosk_core::ident::StatusEvent;
use kiosk_protocol::{DisplayCommand, KeyCode};

/// Channel capacity for key codes
const KEY_CHANNEL_SIZE: usize = 4;

/// Channel capacity for display commands
const DISPLAY_CHANNEL_SIZE: usize = 10;

/// Channel capacity for render push completions
const RENDER_DONE_SIZE: usize = 2;

/// Channel capacity for identification status events
const IDENT_EVENTS_SIZE: usize = 8;

/// Back-off for OS threads waiting on a full channel
const POST_RETRY: Duration = Duration::from_millis(5);

/// Key codes from the keypad task
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, KeyCode, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Display commands for the display task, applied strictly in order
pub static DISPLAY_CHANNEL: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_CHANNEL_SIZE> =
    Channel::new();

/// Outcome of a render push, posted by the push thread
pub static RENDER_DONE: Channel<CriticalSectionRawMutex, Result<(), ErrorInfo>, RENDER_DONE_SIZE> =
    Channel::new();

/// Identification status callbacks, republished by the bridge
pub static IDENT_EVENTS: Channel<CriticalSectionRawMutex, StatusEvent, IDENT_EVENTS_SIZE> =
    Channel::new();

/// Send from an OS thread, sleeping while the channel is full
///
/// Worker threads have no waker to park on, so they retry on a short
/// sleep instead of spinning.
pub fn post_blocking<T, const N: usize>(
    channel: &Channel<CriticalSectionRawMutex, T, N>,
    mut msg: T,
) {
    loop {
        match channel.try_send(msg) {
            Ok(()) => return,
            Err(TrySendError::Full(back)) => {
                msg = back;
                thread::sleep(POST_RETRY);
            }
        }
    }
}
