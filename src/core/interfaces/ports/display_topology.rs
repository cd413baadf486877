use anyhow::Result;

use crate::core::errors::CaptureError;
use crate::core::models::{DisplayDescriptor, GlobalPoint};

/// Enumerates physical displays. Every call takes a fresh snapshot because
/// monitors can be attached or removed between captures.
pub trait DisplayTopology: Send + Sync {
    fn list_displays(&self) -> Result<Vec<DisplayDescriptor>>;

    fn display_containing(&self, point: GlobalPoint) -> Result<DisplayDescriptor, CaptureError> {
        let displays = self
            .list_displays()
            .map_err(|e| CaptureError::CaptureUnavailable(e.to_string()))?;

        displays
            .into_iter()
            .find(|display| display.bounds.contains(point))
            .ok_or(CaptureError::NoDisplayFound {
                x: point.x,
                y: point.y,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScreenRect;

    struct FixedTopology {
        displays: Vec<DisplayDescriptor>,
    }

    impl DisplayTopology for FixedTopology {
        fn list_displays(&self) -> Result<Vec<DisplayDescriptor>> {
            Ok(self.displays.clone())
        }
    }

    fn dual_monitor_topology() -> FixedTopology {
        FixedTopology {
            displays: vec![
                DisplayDescriptor::with_bounds(1, ScreenRect::new(0, 0, 1920, 1080)),
                DisplayDescriptor::with_bounds(2, ScreenRect::new(1920, 0, 2560, 1440)),
            ],
        }
    }

    #[test]
    fn test_display_containing_resolves_owning_display() {
        let topology = dual_monitor_topology();

        let first = topology
            .display_containing(GlobalPoint::at_coordinates(100, 100))
            .unwrap();
        assert_eq!(first.id, 1);

        let second = topology
            .display_containing(GlobalPoint::at_coordinates(2000, 1200))
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_display_containing_fails_for_off_screen_point() {
        let topology = dual_monitor_topology();

        let result = topology.display_containing(GlobalPoint::at_coordinates(-50, -50));
        assert!(matches!(
            result,
            Err(CaptureError::NoDisplayFound { x: -50, y: -50 })
        ));
    }

    #[test]
    fn test_display_containing_fails_with_no_displays() {
        let topology = FixedTopology { displays: vec![] };

        let result = topology.display_containing(GlobalPoint::at_coordinates(0, 0));
        assert!(matches!(result, Err(CaptureError::NoDisplayFound { .. })));
    }
}
