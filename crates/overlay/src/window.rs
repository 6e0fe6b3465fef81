//! Full-screen overlay viewport

use crate::render::OverlayRenderer;
use crate::selection::{Direction, OverlayKey, Point, Region, RegionSelector, SelectorEvent};
use capture::Rect;
use egui::{CursorIcon, Event, Key, PointerButton, Pos2, ViewportBuilder, ViewportCommand, ViewportId};

/// Maps overlay coordinates (points) to physical screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    /// Overlay's top-left corner on screen, in points
    pub origin: Pos2,
    pub pixels_per_point: f32,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            pixels_per_point: 1.0,
        }
    }
}

impl ScreenMapping {
    /// Physical capture rectangle for a region
    pub fn to_capture_rect(&self, region: &Region) -> Rect {
        let r = region.normalized();
        let to_px = |origin: f32, v: i32| ((origin + v as f32) * self.pixels_per_point).round() as i32;

        let left = to_px(self.origin.x, r.left);
        let top = to_px(self.origin.y, r.top);
        let right = to_px(self.origin.x, r.right);
        let bottom = to_px(self.origin.y, r.bottom);

        Rect::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }
}

/// What one overlay frame produced
#[derive(Debug, Default)]
pub struct OverlayFrame {
    pub events: Vec<SelectorEvent>,
    pub mapping: Option<ScreenMapping>,
}

/// Overlay window for selection
pub struct OverlayWindow;

impl OverlayWindow {
    const TITLE: &'static str = "Select Region";

    pub fn viewport_id() -> ViewportId {
        ViewportId::from_hash_of("regionshot_overlay")
    }

    /// Show the overlay for this frame and collect its input.
    ///
    /// The viewport closes on the first frame this is not called.
    pub fn show(ctx: &egui::Context, selector: &RegionSelector, focus: bool) -> OverlayFrame {
        let builder = ViewportBuilder::default()
            .with_title(Self::TITLE)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_fullscreen(true)
            .with_taskbar(false);

        ctx.show_viewport_immediate(Self::viewport_id(), builder, |ctx, _class| {
            if focus {
                ctx.send_viewport_cmd(ViewportCommand::Focus);
            }

            let frame = ctx.input(|i| OverlayFrame {
                events: translate_events(&i.events, i.viewport().close_requested()),
                mapping: i.viewport().inner_rect.map(|rect| ScreenMapping {
                    origin: rect.min,
                    pixels_per_point: i.pixels_per_point,
                }),
            });

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    OverlayRenderer::new(selector).render(ui.painter(), ctx.screen_rect());
                });
            ctx.set_cursor_icon(CursorIcon::Crosshair);

            frame
        })
    }
}

fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x.round() as i32, pos.y.round() as i32)
}

fn map_key(key: Key) -> Option<OverlayKey> {
    match key {
        Key::Space => Some(OverlayKey::Space),
        Key::Escape => Some(OverlayKey::Escape),
        Key::ArrowLeft => Some(OverlayKey::Arrow(Direction::Left)),
        Key::ArrowRight => Some(OverlayKey::Arrow(Direction::Right)),
        Key::ArrowUp => Some(OverlayKey::Arrow(Direction::Up)),
        Key::ArrowDown => Some(OverlayKey::Arrow(Direction::Down)),
        _ => None,
    }
}

/// Raw egui input to selector events, in arrival order
fn translate_events(events: &[Event], close_requested: bool) -> Vec<SelectorEvent> {
    let mut out: Vec<SelectorEvent> = events
        .iter()
        .filter_map(|event| match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => Some(if *pressed {
                SelectorEvent::Press(to_point(*pos))
            } else {
                SelectorEvent::Release(to_point(*pos))
            }),
            Event::PointerMoved(pos) => Some(SelectorEvent::Move(to_point(*pos))),
            Event::Key {
                key,
                pressed: true,
                repeat,
                ..
            } => match map_key(*key)? {
                // Holding Space must not queue one capture per repeat
                OverlayKey::Space if *repeat => None,
                k => Some(SelectorEvent::Key(k)),
            },
            _ => None,
        })
        .collect();

    if close_requested {
        out.push(SelectorEvent::CloseRequested);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Modifiers};

    fn key(key: Key, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn identity_mapping_keeps_coordinates() {
        let rect = ScreenMapping::default().to_capture_rect(&Region::new(300, 250, 100, 100));
        assert_eq!(rect, Rect::new(100, 100, 200, 150));
    }

    #[test]
    fn mapping_applies_origin_and_scale() {
        let mapping = ScreenMapping {
            origin: pos2(10.0, 0.0),
            pixels_per_point: 1.5,
        };
        let rect = mapping.to_capture_rect(&Region::new(0, 10, 20, 30));
        assert_eq!(rect, Rect::new(15, 15, 30, 30));
    }

    #[test]
    fn pointer_and_keys_are_translated_in_order() {
        let events = vec![
            Event::PointerButton {
                pos: pos2(1.4, 2.6),
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Modifiers::NONE,
            },
            Event::PointerMoved(pos2(10.0, 20.0)),
            Event::PointerButton {
                pos: pos2(10.0, 20.0),
                button: PointerButton::Primary,
                pressed: false,
                modifiers: Modifiers::NONE,
            },
            key(Key::ArrowRight, false),
            key(Key::A, false),
        ];

        assert_eq!(
            translate_events(&events, false),
            vec![
                SelectorEvent::Press(Point::new(1, 3)),
                SelectorEvent::Move(Point::new(10, 20)),
                SelectorEvent::Release(Point::new(10, 20)),
                SelectorEvent::Key(OverlayKey::Arrow(Direction::Right)),
            ]
        );
    }

    #[test]
    fn secondary_button_is_ignored() {
        let events = vec![Event::PointerButton {
            pos: pos2(1.0, 1.0),
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::NONE,
        }];
        assert!(translate_events(&events, false).is_empty());
    }

    #[test]
    fn repeated_space_is_dropped_but_arrows_repeat() {
        let events = vec![
            key(Key::Space, false),
            key(Key::Space, true),
            key(Key::ArrowUp, true),
        ];
        assert_eq!(
            translate_events(&events, true),
            vec![
                SelectorEvent::Key(OverlayKey::Space),
                SelectorEvent::Key(OverlayKey::Arrow(Direction::Up)),
                SelectorEvent::CloseRequested,
            ]
        );
    }
}
