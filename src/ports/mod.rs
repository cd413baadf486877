mod markdown_report_sink;
mod mouse_position_provider;
mod xcap_display_topology;
mod xcap_frame_grabber;

pub use markdown_report_sink::MarkdownReportSink;
pub use mouse_position_provider::SystemMousePositionProvider;
pub use xcap_display_topology::XcapDisplayTopology;
pub use xcap_frame_grabber::XcapFrameGrabber;
