//! Selection logic for drawing and moving a region

/// Pointer position in overlay coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle as two corners (left, top, right, bottom) in overlay coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Region spanned by two drag points, in the order they were given
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Bounding box with left <= right and top <= bottom
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn width(&self) -> u32 {
        (self.right - self.left).unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).unsigned_abs()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// `WxH` text shown next to the rectangle
    pub fn dimension_text(&self) -> String {
        format!("{}x{}", self.width(), self.height())
    }
}

/// Arrow key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Keys the overlay reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Space,
    Escape,
    Arrow(Direction),
}

/// Input delivered to the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Press(Point),
    Move(Point),
    Release(Point),
    Key(OverlayKey),
    CloseRequested,
}

/// Interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing drawn yet
    Empty,
    /// Button held, `corner` follows the pointer
    Sizing { anchor: Point, corner: Point },
    /// Size fixed; movable by drag or arrow keys
    Finalized { region: Region },
    /// Button held again, region follows the pointer delta
    Dragging { region: Region, last: Point },
    /// Overlay destroyed
    Closed,
}

/// What the owner should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    Ignored,
    Redraw,
    Moved(Direction),
    CaptureRequested,
    Closed,
}

/// Live size label placement
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLabel {
    pub text: String,
    /// Horizontal center of the rectangle
    pub center_x: f32,
    /// Vertical center of the label, above the top edge
    pub center_y: f32,
}

/// Distance between the rectangle's top edge and the label center
pub const LABEL_OFFSET: f32 = 20.0;

/// Overlay dim while drawing
pub const DRAW_ALPHA: f32 = 0.3;
/// Overlay dim once a region is active
pub const ACTIVE_ALPHA: f32 = 0.15;

/// Region selector for one overlay
#[derive(Debug, Clone)]
pub struct RegionSelector {
    state: SelectionState,
    step: i32,
}

impl RegionSelector {
    /// Selector waiting for a drag-to-draw
    pub fn new(step: i32) -> Self {
        Self {
            state: SelectionState::Empty,
            step,
        }
    }

    /// Selector with a pre-drawn, movable region
    pub fn with_region(region: Region, step: i32) -> Self {
        Self {
            state: SelectionState::Finalized {
                region: region.normalized(),
            },
            step,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Rectangle currently on screen, if any
    pub fn region(&self) -> Option<Region> {
        match self.state {
            SelectionState::Sizing { anchor, corner } => Some(Region::from_corners(anchor, corner)),
            SelectionState::Finalized { region } | SelectionState::Dragging { region, .. } => {
                Some(region)
            }
            SelectionState::Empty | SelectionState::Closed => None,
        }
    }

    /// Region whose size is fixed (finished drawing)
    pub fn finalized_region(&self) -> Option<Region> {
        match self.state {
            SelectionState::Finalized { region } | SelectionState::Dragging { region, .. } => {
                Some(region)
            }
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == SelectionState::Closed
    }

    pub fn overlay_alpha(&self) -> f32 {
        if self.finalized_region().is_some() {
            ACTIVE_ALPHA
        } else {
            DRAW_ALPHA
        }
    }

    pub fn dimension_label(&self) -> Option<DimensionLabel> {
        self.region().map(|r| DimensionLabel {
            text: r.dimension_text(),
            center_x: (r.left + r.right) as f32 / 2.0,
            center_y: r.top.min(r.bottom) as f32 - LABEL_OFFSET,
        })
    }

    /// End a drag in place. The release of a drag interrupted by a capture
    /// never reaches the hidden overlay.
    pub fn settle(&mut self) {
        if let SelectionState::Dragging { region, .. } = self.state {
            log::debug!("Drag settled at {:?}", region);
            self.state = SelectionState::Finalized { region };
        }
    }

    /// Apply one input event
    pub fn handle(&mut self, event: SelectorEvent) -> SelectorAction {
        use SelectionState::*;

        if self.state == Closed {
            return SelectorAction::Ignored;
        }

        match (self.state, event) {
            (_, SelectorEvent::CloseRequested) | (_, SelectorEvent::Key(OverlayKey::Escape)) => {
                self.state = Closed;
                SelectorAction::Closed
            }

            (_, SelectorEvent::Key(OverlayKey::Space)) => SelectorAction::CaptureRequested,

            (Empty, SelectorEvent::Press(p)) => {
                self.state = Sizing { anchor: p, corner: p };
                SelectorAction::Redraw
            }
            (Sizing { anchor, .. }, SelectorEvent::Move(p)) => {
                self.state = Sizing { anchor, corner: p };
                SelectorAction::Redraw
            }
            (Sizing { anchor, .. }, SelectorEvent::Release(p)) => {
                let region = Region::from_corners(anchor, p).normalized();
                log::debug!("Region finalized at {:?} ({})", region, region.dimension_text());
                self.state = Finalized { region };
                SelectorAction::Redraw
            }

            (Finalized { region }, SelectorEvent::Press(p)) => {
                self.state = Dragging { region, last: p };
                SelectorAction::Redraw
            }
            (Dragging { region, .. }, SelectorEvent::Press(p)) => {
                self.state = Dragging { region, last: p };
                SelectorAction::Redraw
            }
            (Dragging { region, last }, SelectorEvent::Move(p)) => {
                self.state = Dragging {
                    region: region.translate(p.x - last.x, p.y - last.y),
                    last: p,
                };
                SelectorAction::Redraw
            }
            (Dragging { region, .. }, SelectorEvent::Release(_)) => {
                self.state = Finalized { region };
                SelectorAction::Redraw
            }

            (Finalized { region }, SelectorEvent::Key(OverlayKey::Arrow(dir))) => {
                let (dx, dy) = dir.delta(self.step);
                self.state = Finalized {
                    region: region.translate(dx, dy),
                };
                SelectorAction::Moved(dir)
            }
            (Dragging { region, last }, SelectorEvent::Key(OverlayKey::Arrow(dir))) => {
                let (dx, dy) = dir.delta(self.step);
                self.state = Dragging {
                    region: region.translate(dx, dy),
                    last,
                };
                SelectorAction::Moved(dir)
            }

            _ => SelectorAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(selector: &mut RegionSelector, from: (i32, i32), to: (i32, i32)) {
        selector.handle(SelectorEvent::Press(Point::new(from.0, from.1)));
        selector.handle(SelectorEvent::Move(Point::new(to.0, to.1)));
        selector.handle(SelectorEvent::Release(Point::new(to.0, to.1)));
    }

    fn arrow(dir: Direction) -> SelectorEvent {
        SelectorEvent::Key(OverlayKey::Arrow(dir))
    }

    #[test]
    fn press_starts_degenerate_rectangle() {
        let mut sel = RegionSelector::new(1);
        assert_eq!(
            sel.handle(SelectorEvent::Press(Point::new(40, 50))),
            SelectorAction::Redraw
        );
        assert_eq!(sel.region(), Some(Region::new(40, 50, 40, 50)));
        assert_eq!(sel.dimension_label().unwrap().text, "0x0");
        assert!(sel.finalized_region().is_none());
    }

    #[test]
    fn size_is_independent_of_drag_direction() {
        let corners = [
            ((100, 100), (300, 250)),
            ((300, 250), (100, 100)),
            ((300, 100), (100, 250)),
            ((100, 250), (300, 100)),
        ];

        for (from, to) in corners {
            let mut sel = RegionSelector::new(1);
            drag(&mut sel, from, to);
            let region = sel.finalized_region().unwrap();
            assert_eq!((region.width(), region.height()), (200, 150), "{from:?} -> {to:?}");
            assert_eq!(region, Region::new(100, 100, 300, 250));
        }
    }

    #[test]
    fn label_tracks_pointer_while_sizing() {
        let mut sel = RegionSelector::new(1);
        sel.handle(SelectorEvent::Press(Point::new(100, 100)));
        sel.handle(SelectorEvent::Move(Point::new(160, 40)));

        let label = sel.dimension_label().unwrap();
        assert_eq!(label.text, "60x60");
        assert_eq!(label.center_x, 130.0);
        assert_eq!(label.center_y, 40.0 - LABEL_OFFSET);
    }

    #[test]
    fn arrow_nudges_keep_size() {
        let mut sel = RegionSelector::new(1);
        drag(&mut sel, (100, 100), (300, 250));

        for _ in 0..5 {
            assert_eq!(
                sel.handle(arrow(Direction::Right)),
                SelectorAction::Moved(Direction::Right)
            );
        }

        let region = sel.finalized_region().unwrap();
        assert_eq!(region, Region::new(105, 100, 305, 250));
        assert_eq!((region.width(), region.height()), (200, 150));
    }

    #[test]
    fn single_nudge_changes_one_axis_by_step() {
        let start = Region::new(10, 20, 110, 70);
        let cases = [
            (Direction::Left, start.translate(-3, 0)),
            (Direction::Right, start.translate(3, 0)),
            (Direction::Up, start.translate(0, -3)),
            (Direction::Down, start.translate(0, 3)),
        ];

        for (dir, expected) in cases {
            let mut sel = RegionSelector::with_region(start, 3);
            sel.handle(arrow(dir));
            let moved = sel.finalized_region().unwrap();
            assert_eq!(moved, expected);
            assert_eq!((moved.width(), moved.height()), (100, 50));
        }
    }

    #[test]
    fn arrows_ignored_before_region_exists() {
        let mut sel = RegionSelector::new(1);
        assert_eq!(sel.handle(arrow(Direction::Up)), SelectorAction::Ignored);

        sel.handle(SelectorEvent::Press(Point::new(5, 5)));
        assert_eq!(sel.handle(arrow(Direction::Up)), SelectorAction::Ignored);
        assert_eq!(sel.region(), Some(Region::new(5, 5, 5, 5)));
    }

    #[test]
    fn drag_moves_by_incremental_delta() {
        let mut sel = RegionSelector::with_region(Region::new(0, 0, 50, 40), 1);

        sel.handle(SelectorEvent::Press(Point::new(10, 10)));
        assert!(matches!(sel.state(), SelectionState::Dragging { .. }));
        sel.handle(SelectorEvent::Move(Point::new(15, 12)));
        sel.handle(SelectorEvent::Move(Point::new(25, 22)));
        sel.handle(SelectorEvent::Release(Point::new(25, 22)));

        assert_eq!(
            *sel.state(),
            SelectionState::Finalized {
                region: Region::new(15, 12, 65, 52)
            }
        );
        assert_eq!(sel.dimension_label().unwrap().text, "50x40");
    }

    #[test]
    fn press_after_finalize_moves_instead_of_resizing() {
        let mut sel = RegionSelector::new(1);
        drag(&mut sel, (0, 0), (20, 20));
        drag(&mut sel, (5, 5), (105, 5));

        assert_eq!(sel.finalized_region(), Some(Region::new(100, 0, 120, 20)));
    }

    #[test]
    fn arrows_work_mid_drag() {
        let mut sel = RegionSelector::with_region(Region::new(0, 0, 10, 10), 1);
        sel.handle(SelectorEvent::Press(Point::new(5, 5)));
        sel.handle(arrow(Direction::Down));
        sel.handle(SelectorEvent::Move(Point::new(6, 5)));

        assert_eq!(sel.region(), Some(Region::new(1, 1, 11, 11)));
    }

    #[test]
    fn space_requests_capture_without_changing_state() {
        let mut sel = RegionSelector::with_region(Region::new(1, 2, 3, 4), 1);
        let before = *sel.state();
        assert_eq!(
            sel.handle(SelectorEvent::Key(OverlayKey::Space)),
            SelectorAction::CaptureRequested
        );
        assert_eq!(*sel.state(), before);
    }

    #[test]
    fn settle_ends_drag_without_moving() {
        let mut sel = RegionSelector::with_region(Region::new(0, 0, 50, 50), 1);
        sel.handle(SelectorEvent::Press(Point::new(10, 10)));
        assert_eq!(
            sel.handle(SelectorEvent::Key(OverlayKey::Space)),
            SelectorAction::CaptureRequested
        );

        sel.settle();
        assert_eq!(
            *sel.state(),
            SelectionState::Finalized {
                region: Region::new(0, 0, 50, 50)
            }
        );

        // Hovering without a held button leaves the rectangle alone
        assert_eq!(
            sel.handle(SelectorEvent::Move(Point::new(110, 10))),
            SelectorAction::Ignored
        );
        assert_eq!(sel.region(), Some(Region::new(0, 0, 50, 50)));
    }

    #[test]
    fn settle_leaves_other_states_alone() {
        let mut sizing = RegionSelector::new(1);
        sizing.handle(SelectorEvent::Press(Point::new(3, 3)));
        let before = *sizing.state();
        sizing.settle();
        assert_eq!(*sizing.state(), before);

        let mut finalized = RegionSelector::with_region(Region::new(1, 1, 4, 4), 1);
        finalized.settle();
        assert_eq!(finalized.finalized_region(), Some(Region::new(1, 1, 4, 4)));
    }

    #[test]
    fn press_mid_drag_reanchors() {
        let mut sel = RegionSelector::with_region(Region::new(0, 0, 50, 50), 1);
        sel.handle(SelectorEvent::Press(Point::new(10, 10)));

        // Release lost; the next press picks the drag up from the new point
        assert_eq!(
            sel.handle(SelectorEvent::Press(Point::new(110, 10))),
            SelectorAction::Redraw
        );
        assert_eq!(sel.region(), Some(Region::new(0, 0, 50, 50)));

        sel.handle(SelectorEvent::Move(Point::new(115, 20)));
        sel.handle(SelectorEvent::Release(Point::new(115, 20)));
        assert_eq!(sel.finalized_region(), Some(Region::new(5, 10, 55, 60)));
    }

    #[test]
    fn escape_closes_from_any_state() {
        let mut sizing = RegionSelector::new(1);
        sizing.handle(SelectorEvent::Press(Point::new(1, 1)));
        let mut dragging = RegionSelector::with_region(Region::new(0, 0, 5, 5), 1);
        dragging.handle(SelectorEvent::Press(Point::new(2, 2)));

        for mut sel in [
            RegionSelector::new(1),
            sizing,
            RegionSelector::with_region(Region::new(0, 0, 5, 5), 1),
            dragging,
        ] {
            assert_eq!(
                sel.handle(SelectorEvent::Key(OverlayKey::Escape)),
                SelectorAction::Closed
            );
            assert!(sel.is_closed());
            assert!(sel.region().is_none());
            assert_eq!(
                sel.handle(SelectorEvent::Press(Point::new(1, 1))),
                SelectorAction::Ignored
            );
        }
    }

    #[test]
    fn overlay_dims_less_once_region_active() {
        let mut sel = RegionSelector::new(1);
        assert_eq!(sel.overlay_alpha(), DRAW_ALPHA);
        sel.handle(SelectorEvent::Press(Point::new(0, 0)));
        assert_eq!(sel.overlay_alpha(), DRAW_ALPHA);
        sel.handle(SelectorEvent::Release(Point::new(9, 9)));
        assert_eq!(sel.overlay_alpha(), ACTIVE_ALPHA);
    }

    #[test]
    fn reused_region_is_normalized() {
        let sel = RegionSelector::with_region(Region::new(30, 40, 10, 20), 1);
        assert_eq!(sel.finalized_region(), Some(Region::new(10, 20, 30, 40)));
    }
}
