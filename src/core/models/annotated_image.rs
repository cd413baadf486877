use crate::core::models::{LocalPoint, PixelBuffer};

/// Result of one capture cycle. Ephemeral: consumed by the document sink and
/// discarded, never cached across invocations.
#[derive(Clone, Debug)]
pub struct AnnotatedImage {
    pub buffer: PixelBuffer,
    pub source_display_id: u32,
    pub annotation_point: LocalPoint,
}
