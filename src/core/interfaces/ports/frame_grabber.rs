use crate::core::errors::CaptureError;
use crate::core::models::{PixelBuffer, ScreenRect};

/// Reads the current contents of one display's global bounding rectangle into
/// a newly allocated RGBA buffer. A failed read is reported as-is; retrying
/// would capture a later, misleading frame.
pub trait FrameGrabber: Send + Sync {
    fn capture(&self, bounds: ScreenRect) -> Result<PixelBuffer, CaptureError>;
}
