//! Collaborator traits
//!
//! These traits define the interface between the mode controller and the
//! tasks, threads and services that carry out its side effects.

pub mod display;
pub mod ident;
pub mod render;
pub mod timer;

pub use display::DisplayQueue;
pub use ident::{IdentificationProvider, ProviderError, Requirements};
pub use render::{ArtifactRenderer, RenderError, RenderPush};
pub use timer::{TimerKind, Timers};

/// Everything the controller needs from its surroundings
pub trait KioskIo: DisplayQueue + RenderPush + IdentificationProvider + Timers {}

impl<T> KioskIo for T where T: DisplayQueue + RenderPush + IdentificationProvider + Timers {}
