//! Scan artifact rendering and remote push

/// Errors from artifact generation or push start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Payload could not be encoded as a scan code
    Encode,
    /// Image could not be produced
    Image,
    /// Push could not be started
    Transport,
}

impl RenderError {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderError::Encode => "payload encoding failed",
            RenderError::Image => "image generation failed",
            RenderError::Transport => "push could not be started",
        }
    }
}

/// Produces ready-to-push images
pub trait ArtifactRenderer {
    /// Rendered image
    type Artifact;

    /// Render the payment request for `amount`
    fn render_payment(&mut self, amount: u16) -> Result<Self::Artifact, RenderError>;

    /// Render an identification scan code from the provider's payload
    fn render_identification(&mut self, payload: &str) -> Result<Self::Artifact, RenderError>;
}

/// Sends artifacts to the remote display
///
/// `push` only starts the transfer. Its outcome comes back to the
/// controller later as a render-finished input.
pub trait RenderPush: ArtifactRenderer {
    fn push(&mut self, artifact: Self::Artifact) -> Result<(), RenderError>;
}
