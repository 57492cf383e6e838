//! Display command queue

use kiosk_protocol::DisplayCommand;

/// Producer side of the display command queue
///
/// Commands must reach the display sink in the order they are enqueued.
/// Implementations may buffer, but never drop or reorder.
pub trait DisplayQueue {
    fn enqueue(&mut self, cmd: DisplayCommand);

    /// Enqueue a sequence of commands
    fn enqueue_all<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = DisplayCommand>,
        Self: Sized,
    {
        for cmd in cmds {
            self.enqueue(cmd);
        }
    }
}
