mod annotation_renderer;
mod output_scaler;

pub use annotation_renderer::AnnotationRenderer;
pub use output_scaler::OutputScaler;
