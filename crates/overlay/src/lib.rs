//! Overlay module for RegionShot
//!
//! Provides the translucent full-screen overlay used to draw, move and
//! capture a single region.

pub mod render;
pub mod selection;
pub mod window;

pub use selection::{
    Direction, DimensionLabel, OverlayKey, Point, Region, RegionSelector, SelectionState,
    SelectorAction, SelectorEvent,
};
pub use window::{OverlayFrame, OverlayWindow, ScreenMapping};
