//! Controller task
//!
//! Owns the [`Controller`] and feeds it every input in arrival order:
//! key codes, render push completions, identification status events and
//! timer expiries. Display commands produced by each input are drained
//! into the display channel before the next input is taken.

use core::future::pending;

use embassy_futures::select::{select4, Either4};
use embassy_time::{Instant, Timer};
use tracing::{debug, error, info};

use kiosk_core::controller::{Controller, ControllerSettings, Input};
use kiosk_core::traits::IdentificationProvider;

use crate::channels::{DISPLAY_CHANNEL, IDENT_EVENTS, KEY_CHANNEL, RENDER_DONE};
use crate::io::{BoardIo, KioskBoardIo};

#[embassy_executor::task]
pub async fn controller_task(settings: ControllerSettings, mut io: BoardIo) {
    info!("Controller task started");

    let mut controller = Controller::new(settings);
    controller.start(&mut io);
    flush_display(&mut io).await;

    loop {
        let input = next_input(&mut io).await;
        debug!(?input, "controller input");

        for t in controller.handle(input, &mut io) {
            info!(
                from = t.from.name(),
                to = t.to.name(),
                event = ?t.event,
                "mode transition"
            );
            if t.event.is_fault() {
                if let Some(info) = controller.error() {
                    error!(
                        code = info.code.number(),
                        protocol = info.code.is_protocol_error(),
                        "{}",
                        info.log_message
                    );
                }
            }
        }

        flush_display(&mut io).await;
    }
}

/// Wait for the next controller input
///
/// A timer that is already due wins over queued channel input.
async fn next_input<P: IdentificationProvider>(io: &mut KioskBoardIo<P>) -> Input {
    loop {
        if let Some(kind) = io.take_expired(Instant::now()) {
            return Input::TimerElapsed(kind);
        }

        let deadline = io.next_deadline().map(|(_, at)| at);
        let timer = async {
            match deadline {
                Some(at) => Timer::at(at).await,
                None => pending().await,
            }
        };

        match select4(
            KEY_CHANNEL.receive(),
            RENDER_DONE.receive(),
            IDENT_EVENTS.receive(),
            timer,
        )
        .await
        {
            Either4::First(code) => return Input::Key(code),
            Either4::Second(result) => return Input::RenderFinished(result),
            Either4::Third(event) => return Input::Identification(event),
            // Deadline reached, picked up at the top of the loop
            Either4::Fourth(()) => {}
        }
    }
}

/// Hand buffered display commands to the display task
///
/// Waits while the display channel is full, so nothing is dropped.
async fn flush_display<P: IdentificationProvider>(io: &mut KioskBoardIo<P>) {
    while let Some(cmd) = io.next_command() {
        DISPLAY_CHANNEL.send(cmd).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::testing::io;
    use embassy_futures::block_on;
    use kiosk_core::traits::{DisplayQueue, TimerKind, Timers};
    use kiosk_protocol::{DisplayCommand, KeyCode};

    // Shares the static channels, so everything runs in one test
    #[test]
    fn test_inputs_and_display_flush() {
        let mut io = io();

        // Expired timer before a waiting key
        io.start_timer(TimerKind::Notice, 0);
        KEY_CHANNEL.try_send(KeyCode(7)).unwrap();
        assert_eq!(
            block_on(next_input(&mut io)),
            Input::TimerElapsed(TimerKind::Notice)
        );
        assert_eq!(block_on(next_input(&mut io)), Input::Key(KeyCode(7)));

        // Armed timer fires with no other input
        io.start_timer(TimerKind::IdentificationDeadline, 20);
        assert_eq!(
            block_on(next_input(&mut io)),
            Input::TimerElapsed(TimerKind::IdentificationDeadline)
        );
        assert_eq!(io.next_deadline(), None);

        // Render completion is forwarded as is
        RENDER_DONE.try_send(Ok(())).unwrap();
        assert_eq!(block_on(next_input(&mut io)), Input::RenderFinished(Ok(())));

        // Buffered commands reach the display channel in order
        io.enqueue(DisplayCommand::Clear);
        io.enqueue(DisplayCommand::ShowCursor);
        io.enqueue(DisplayCommand::MoveLeft(2));
        block_on(flush_display(&mut io));
        assert_eq!(io.next_command(), None);
        assert_eq!(DISPLAY_CHANNEL.try_receive().ok(), Some(DisplayCommand::Clear));
        assert_eq!(DISPLAY_CHANNEL.try_receive().ok(), Some(DisplayCommand::ShowCursor));
        assert_eq!(DISPLAY_CHANNEL.try_receive().ok(), Some(DisplayCommand::MoveLeft(2)));
        assert!(DISPLAY_CHANNEL.try_receive().is_err());
    }
}
