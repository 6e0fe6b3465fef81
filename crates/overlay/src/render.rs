//! egui painting for the overlay

use crate::selection::{RegionSelector, SelectionState};
use egui::{pos2, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

const OUTLINE_WIDTH: f32 = 4.0;
const OUTLINE_COLOR: Color32 = Color32::from_rgb(0, 0, 255);
const LABEL_FONT_SIZE: f32 = 13.0;
const LABEL_PADDING: f32 = 3.0;
const INFO_BAR_HEIGHT: f32 = 32.0;

/// Sparse tint inside the rectangle so the content below stays visible
fn region_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 255, 30)
}

/// Overlay renderer
pub struct OverlayRenderer<'a> {
    selector: &'a RegionSelector,
}

impl<'a> OverlayRenderer<'a> {
    pub fn new(selector: &'a RegionSelector) -> Self {
        Self { selector }
    }

    /// Paint the whole overlay into `screen`
    pub fn render(&self, painter: &Painter, screen: Rect) {
        self.draw_dim(painter, screen);
        self.draw_selection(painter);
        self.draw_dimension_label(painter);
        self.draw_info_bar(painter, screen);
    }

    fn draw_dim(&self, painter: &Painter, screen: Rect) {
        let alpha = (self.selector.overlay_alpha() * 255.0).round() as u8;
        painter.rect_filled(screen, 0.0, Color32::from_black_alpha(alpha));
    }

    fn draw_selection(&self, painter: &Painter) {
        let Some(region) = self.selector.region() else {
            return;
        };
        let r = region.normalized();
        let rect = Rect::from_min_max(
            pos2(r.left as f32, r.top as f32),
            pos2(r.right as f32, r.bottom as f32),
        );

        painter.rect_filled(rect, 0.0, region_fill());
        painter.rect_stroke(rect, 0.0, Stroke::new(OUTLINE_WIDTH, OUTLINE_COLOR));
    }

    fn draw_dimension_label(&self, painter: &Painter) {
        let Some(label) = self.selector.dimension_label() else {
            return;
        };

        let galley = painter.layout_no_wrap(
            label.text,
            FontId::proportional(LABEL_FONT_SIZE),
            Color32::WHITE,
        );
        let text_rect =
            Rect::from_center_size(Pos2::new(label.center_x, label.center_y), galley.size());

        // Opaque box keeps the label legible over any background
        painter.rect_filled(text_rect.expand(LABEL_PADDING), 2.0, Color32::BLACK);
        painter.galley(text_rect.min, galley, Color32::WHITE);
    }

    fn draw_info_bar(&self, painter: &Painter, screen: Rect) {
        let bar = Rect::from_min_max(
            pos2(screen.left(), screen.bottom() - INFO_BAR_HEIGHT),
            screen.max,
        );
        painter.rect_filled(bar, 0.0, Color32::from_rgb(0x33, 0x33, 0x33));
        painter.text(
            pos2(bar.left() + 10.0, bar.center().y),
            Align2::LEFT_CENTER,
            hint_text(self.selector.state()),
            FontId::proportional(14.0),
            Color32::WHITE,
        );
    }
}

/// Instructions for the current interaction state
pub fn hint_text(state: &SelectionState) -> &'static str {
    match state {
        SelectionState::Empty => "Drag to draw a region | Esc close",
        SelectionState::Sizing { .. } => "Release to fix the region size",
        SelectionState::Finalized { .. } => {
            "Drag or arrow keys to move | Space capture | Esc close"
        }
        SelectionState::Dragging { .. } => "Release to drop the region",
        SelectionState::Closed => "",
    }
}
