use anyhow::Result;

use crate::core::models::PixelBuffer;

/// External collaborator accumulating ordered content blocks into a persisted
/// report. Append-only and single-writer; the session calls the three methods
/// in order caption, separator, image for each capture.
pub trait DocumentSink: Send + Sync {
    fn append_caption(&self, text: &str) -> Result<()>;

    fn append_separator(&self) -> Result<()>;

    fn append_image(&self, image: &PixelBuffer, max_width: f32) -> Result<()>;
}
