//! Screen rectangle grab using xcap

use crate::{CaptureError, CaptureResult, FrameData, Rect, ScreenGrabber};
use xcap::Monitor;

/// Composes the rectangle from every monitor it overlaps.
///
/// Parts of the rectangle no monitor covers come out black.
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self, rect: Rect) -> CaptureResult<FrameData> {
        if rect.is_empty() {
            return Err(CaptureError::EmptyRegion(rect.width, rect.height));
        }

        let mut frame = FrameData::blank(rect.width, rect.height);
        let mut covered = 0u64;

        for monitor in Monitor::all()? {
            let bounds = Rect::new(monitor.x()?, monitor.y()?, monitor.width()?, monitor.height()?);
            let Some(overlap) = bounds.intersection(&rect) else {
                continue;
            };

            let image = monitor.capture_image()?;
            let (width, height) = image.dimensions();
            let screen = FrameData::from_rgba(width, height, image.into_raw())?;

            frame.paste(&screen, bounds.x - rect.x, bounds.y - rect.y);
            covered += overlap.width as u64 * overlap.height as u64;
        }

        if covered == 0 {
            return Err(CaptureError::NoMonitor(rect.x, rect.y));
        }
        if covered < rect.width as u64 * rect.height as u64 {
            log::debug!(
                "Region {}x{} at ({}, {}) is partly off-screen, padded with black",
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
        }
        Ok(frame)
    }
}
