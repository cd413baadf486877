mod annotated_image;
mod annotation_style;
mod display;
mod pixel_buffer;
mod user_settings;

pub use annotated_image::AnnotatedImage;
pub use annotation_style::{AnnotationKind, AnnotationStyle, MarkerShape};
pub use display::{DisplayDescriptor, GlobalPoint, LocalPoint, ScreenRect};
pub use pixel_buffer::PixelBuffer;
pub use user_settings::{MarkerSettings, SymbolSettings, UserSettings};
