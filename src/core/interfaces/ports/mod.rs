mod display_topology;
mod document_sink;
mod frame_grabber;
mod mouse_position_provider;

pub use display_topology::DisplayTopology;
pub use document_sink::DocumentSink;
pub use frame_grabber::FrameGrabber;
pub use mouse_position_provider::MousePositionProvider;
