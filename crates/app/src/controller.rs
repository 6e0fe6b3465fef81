//! Main controller: overlay lifecycle, capture and last-region memory

use crate::config::Config;
use anyhow::Context;
use capture::ScreenGrabber;
use export::ImageExporter;
use overlay::{Region, RegionSelector, ScreenMapping, SelectorAction, SelectorEvent};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Picks the file a capture is written to
pub trait SaveTarget {
    /// `None` when the user cancelled
    fn choose_path(&self) -> Option<PathBuf>;
}

/// Native save dialog
pub struct FileDialogTarget {
    default_name: String,
}

impl FileDialogTarget {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
        }
    }
}

impl SaveTarget for FileDialogTarget {
    fn choose_path(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PNG files", &["png"])
            .add_filter("All files", &["*"])
            .set_file_name(&self.default_name)
            .save_file()
    }
}

/// Most recently captured region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastRegion {
    pub bbox: Region,
    pub width: u32,
    pub height: u32,
}

impl LastRegion {
    fn from_bbox(bbox: Region) -> Self {
        Self {
            bbox,
            width: bbox.width(),
            height: bbox.height(),
        }
    }
}

/// Result of one screenshot attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    NoRegion,
    Saved(PathBuf),
    Cancelled,
    Failed(String),
}

pub struct Controller {
    selector: Option<RegionSelector>,
    overlay_hidden: bool,
    focus_requested: bool,
    mapping: ScreenMapping,
    last_region: Option<LastRegion>,
    pending_capture: Option<Instant>,
    status: String,
    movement_step: i32,
    capture_delay: Duration,
    hotkey_label: String,
}

impl Controller {
    pub fn new(cfg: &Config) -> Self {
        Self {
            selector: None,
            overlay_hidden: false,
            focus_requested: false,
            mapping: ScreenMapping::default(),
            last_region: None,
            pending_capture: None,
            status: format!("Ready - Press '{}' to select new region", cfg.hotkey),
            movement_step: cfg.movement_step,
            capture_delay: cfg.capture_delay(),
            hotkey_label: cfg.hotkey.clone(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_region(&self) -> Option<LastRegion> {
        self.last_region
    }

    /// "WxH" of the last capture, or "None"
    pub fn last_dimension_text(&self) -> String {
        match self.last_region {
            Some(last) => format!("{}x{}", last.width, last.height),
            None => "None".to_string(),
        }
    }

    pub fn selector(&self) -> Option<&RegionSelector> {
        self.selector.as_ref()
    }

    /// Selector to draw this frame; `None` while hidden for a capture
    pub fn visible_selector(&self) -> Option<&RegionSelector> {
        self.selector.as_ref().filter(|_| !self.overlay_hidden)
    }

    pub fn is_overlay_hidden(&self) -> bool {
        self.overlay_hidden
    }

    /// True once after the overlay was opened or restored
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn set_screen_mapping(&mut self, mapping: ScreenMapping) {
        self.mapping = mapping;
    }

    pub fn pending_capture_due(&self) -> Option<Instant> {
        self.pending_capture
    }

    /// Replace any overlay with a fresh one
    pub fn start_new_region(&mut self, initial: Option<Region>) {
        self.pending_capture = None;
        self.overlay_hidden = false;
        self.focus_requested = true;

        let selector = match initial {
            Some(region) => {
                let selector = RegionSelector::with_region(region, self.movement_step);
                self.status = format!(
                    "Region set ({}). Use mouse or arrow keys to position. Space to capture.",
                    region.dimension_text()
                );
                selector
            }
            None => {
                self.status = "Draw a region by clicking and dragging".to_string();
                RegionSelector::new(self.movement_step)
            }
        };

        if self.selector.replace(selector).is_some() {
            log::debug!("Replaced existing overlay");
        }
        log::info!("New region overlay opened (initial: {:?})", initial);
    }

    /// Open an overlay at the last captured box. False if nothing captured yet.
    pub fn reuse_last_region(&mut self) -> bool {
        match self.last_region {
            Some(last) => {
                self.start_new_region(Some(last.bbox));
                true
            }
            None => false,
        }
    }

    pub fn close_region(&mut self) {
        self.pending_capture = None;
        self.overlay_hidden = false;
        if self.selector.take().is_some() {
            self.status = format!(
                "Region closed. Press '{}' to select new region",
                self.hotkey_label
            );
            log::info!("Region overlay closed");
        }
    }

    /// Route overlay input to the selector
    pub fn dispatch(&mut self, event: SelectorEvent) -> SelectorAction {
        let Some(selector) = self.selector.as_mut() else {
            return SelectorAction::Ignored;
        };
        let action = selector.handle(event);

        match action {
            SelectorAction::Moved(dir) => {
                if let Some(region) = selector.region() {
                    self.status = format!(
                        "Region moved {} ({}, {})",
                        dir.name(),
                        region.left,
                        region.top
                    );
                }
            }
            SelectorAction::CaptureRequested => {
                self.request_screenshot(Instant::now());
            }
            SelectorAction::Closed => self.close_region(),
            SelectorAction::Redraw | SelectorAction::Ignored => {}
        }
        action
    }

    /// Drags end when a capture starts; the overlay is hidden before the
    /// button comes back up.
    fn settle_selector(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            selector.settle();
        }
    }

    fn capture_region(&self) -> Option<Region> {
        self.selector
            .as_ref()
            .and_then(RegionSelector::finalized_region)
            .map(|r| r.normalized())
    }

    /// Hide the overlay now and capture once `now + capture_delay` passes
    pub fn request_screenshot(&mut self, now: Instant) -> bool {
        if self.capture_region().is_none() {
            self.status = "Please select a region first!".to_string();
            return false;
        }
        if self.pending_capture.is_some() {
            return false;
        }

        self.settle_selector();
        self.overlay_hidden = true;
        self.pending_capture = Some(now + self.capture_delay);
        self.status = "Capturing...".to_string();
        true
    }

    /// Run a scheduled capture when due
    pub fn poll_pending_capture(
        &mut self,
        now: Instant,
        grabber: &dyn ScreenGrabber,
        target: &dyn SaveTarget,
        exporter: &ImageExporter,
    ) -> Option<CaptureOutcome> {
        match self.pending_capture {
            Some(due) if now >= due => {
                self.pending_capture = None;
                Some(self.take_screenshot(grabber, target, exporter))
            }
            _ => None,
        }
    }

    /// Grab the finalized region, ask for a path and write the image.
    ///
    /// The overlay is visible again on return, whatever the outcome.
    pub fn take_screenshot(
        &mut self,
        grabber: &dyn ScreenGrabber,
        target: &dyn SaveTarget,
        exporter: &ImageExporter,
    ) -> CaptureOutcome {
        let Some(bbox) = self.capture_region() else {
            self.status = "Please select a region first!".to_string();
            return CaptureOutcome::NoRegion;
        };

        self.settle_selector();
        self.overlay_hidden = true;
        let result = self.capture_and_save(bbox, grabber, target, exporter);
        self.overlay_hidden = false;
        self.focus_requested = true;

        match result {
            Ok(Some(path)) => {
                self.status = format!("Saved: {}", path.display());
                self.last_region = Some(LastRegion::from_bbox(bbox));
                log::info!("Captured {:?} to {}", bbox, path.display());
                CaptureOutcome::Saved(path)
            }
            Ok(None) => {
                self.status = "Screenshot cancelled".to_string();
                CaptureOutcome::Cancelled
            }
            Err(e) => {
                log::warn!("Screenshot failed: {e:#}");
                self.status = format!("Error taking screenshot: {e:#}");
                CaptureOutcome::Failed(format!("{e:#}"))
            }
        }
    }

    fn capture_and_save(
        &self,
        bbox: Region,
        grabber: &dyn ScreenGrabber,
        target: &dyn SaveTarget,
        exporter: &ImageExporter,
    ) -> anyhow::Result<Option<PathBuf>> {
        let rect = self.mapping.to_capture_rect(&bbox);
        let image = grabber
            .grab(rect)
            .context("screen grab")?
            .into_rgba_image()?;

        let Some(path) = target.choose_path() else {
            return Ok(None);
        };
        let written = exporter.save(image, &path).context("write image")?;
        Ok(Some(written))
    }
}
