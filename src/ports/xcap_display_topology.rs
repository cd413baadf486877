use anyhow::{Context, Result};

use crate::core::interfaces::ports::DisplayTopology;
use crate::core::models::{DisplayDescriptor, ScreenRect};
use crate::global_constants::{ERROR_CONTEXT_ENUMERATE_DISPLAYS, LOG_TAG_TOPOLOGY};

/// Display enumeration over the xcap monitor API. Descriptors are a snapshot:
/// every query re-enumerates because monitors can come and go between
/// captures.
pub struct XcapDisplayTopology;

impl XcapDisplayTopology {
    pub fn initialize() -> Self {
        log::debug!("{} initializing xcap display topology", LOG_TAG_TOPOLOGY);
        Self
    }

    fn convert_monitor_to_descriptor(&self, monitor: &xcap::Monitor) -> Result<DisplayDescriptor> {
        let id = monitor.id().with_context(|| "Unable to read monitor id")?;
        let x = monitor.x().with_context(|| "Unable to read monitor x")?;
        let y = monitor.y().with_context(|| "Unable to read monitor y")?;
        let width = monitor
            .width()
            .with_context(|| "Unable to read monitor width")?;
        let height = monitor
            .height()
            .with_context(|| "Unable to read monitor height")?;

        Ok(DisplayDescriptor::with_bounds(
            id,
            ScreenRect::new(x, y, width, height),
        ))
    }
}

impl DisplayTopology for XcapDisplayTopology {
    fn list_displays(&self) -> Result<Vec<DisplayDescriptor>> {
        let monitors = xcap::Monitor::all().with_context(|| ERROR_CONTEXT_ENUMERATE_DISPLAYS)?;

        let mut descriptors = Vec::with_capacity(monitors.len());
        for monitor in &monitors {
            descriptors.push(self.convert_monitor_to_descriptor(monitor)?);
        }

        log::debug!(
            "{} enumerated {} display(s)",
            LOG_TAG_TOPOLOGY,
            descriptors.len()
        );

        Ok(descriptors)
    }
}
