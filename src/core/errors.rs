use thiserror::Error;

/// Engine failure taxonomy. Recoverable conditions (`NoDisplayFound`) are
/// absorbed by the session; the rest surface once to the caller as a single
/// message and never abort the hosting process.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no display contains point ({x}, {y})")]
    NoDisplayFound { x: i32, y: i32 },

    #[error("screen capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("invalid output target width: {0}")]
    InvalidTargetWidth(f32),

    #[error("marker radius must be greater than zero")]
    InvalidMarkerRadius,

    #[error("a capture is already in progress for this session")]
    SessionBusy,

    #[error("document sink rejected content: {0}")]
    DeliveryFailed(String),
}
