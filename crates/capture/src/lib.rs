//! Screen capture module for RegionShot
//!
//! Grabs the pixels under a screen rectangle. GDI on Windows, xcap elsewhere.

pub mod frame;
#[cfg(windows)]
pub mod gdi;
#[cfg(not(windows))]
pub mod xcap_grab;

pub use frame::FrameData;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[cfg(not(windows))]
    #[error("Screen capture error: {0}")]
    Xcap(#[from] xcap::XCapError),

    #[error("Capture region is empty ({0}x{1})")]
    EmptyRegion(u32, u32),

    #[error("No monitor overlaps region at ({0}, {1})")]
    NoMonitor(i32, i32),

    #[error("Screen grab failed: {0}")]
    Grab(String),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Rectangle in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlapping area, `None` when the rectangles don't overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, (right - x) as u32, (bottom - y) as u32))
    }
}

/// Source of screen pixels for a rectangle.
pub trait ScreenGrabber {
    fn grab(&self, rect: Rect) -> CaptureResult<FrameData>;
}

#[cfg(windows)]
pub type PlatformGrabber = gdi::GdiGrabber;

#[cfg(not(windows))]
pub type PlatformGrabber = xcap_grab::XcapGrabber;
