//! Pixel-space rectangles and grid snapping

use dummyrpg_core::Coord;

/// A point in scene pixels; may lie outside the map while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pixel rectangle with inclusive corners
///
/// Corners are kept in the order they were given, so `bottom_right()` of a
/// drag rectangle is the point where the drag ended, even for upward drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Rectangle spanning from `first` to `second`, both included
    pub fn new(first: PixelPoint, second: PixelPoint) -> Self {
        Self {
            left: first.x,
            top: first.y,
            right: second.x,
            bottom: second.y,
        }
    }

    /// Same rectangle with `left <= right` and `top <= bottom`
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> PixelPoint {
        PixelPoint::new(self.right, self.bottom)
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).abs() + 1
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).abs() + 1
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        let r = self.normalized();
        point.x >= r.left && point.x <= r.right && point.y >= r.top && point.y <= r.bottom
    }
}

/// A rectangle of layer cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub origin: Coord,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn new(origin: Coord, width: u16, height: u16) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, coord: Coord) -> bool {
        let x = u32::from(coord.x);
        let y = u32::from(coord.y);
        let ox = u32::from(self.origin.x);
        let oy = u32::from(self.origin.y);
        x >= ox && y >= oy && x < ox + u32::from(self.width) && y < oy + u32::from(self.height)
    }
}

/// Cell geometry of the layer being edited: size in cells and pixel step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub width: u16,
    pub height: u16,
    pub step: u16,
}

impl GridGeometry {
    pub fn new(width: u16, height: u16, step: u16) -> Self {
        Self {
            width,
            height,
            step,
        }
    }

    fn max_x(&self) -> i32 {
        i32::from(self.width) * i32::from(self.step) - 1
    }

    fn max_y(&self) -> i32 {
        i32::from(self.height) * i32::from(self.step) - 1
    }

    /// Snap a point down onto the cell grid
    pub fn snap_point(&self, point: PixelPoint) -> PixelPoint {
        let step = i32::from(self.step);
        if step == 0 {
            return point;
        }
        PixelPoint::new(
            point.x - point.x.rem_euclid(step),
            point.y - point.y.rem_euclid(step),
        )
    }

    /// Clamp a point into the layer's pixel area
    pub fn clamp_point(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            point.x.min(self.max_x()).max(0),
            point.y.min(self.max_y()).max(0),
        )
    }

    /// Normalize a drag rectangle, grow it to whole cells and clamp it to the layer
    ///
    /// The top-left corner snaps down; the bottom-right corner snaps down then
    /// extends by `step - 1` so the last partially covered cell is included.
    pub fn snap_rect(&self, raw: PixelRect) -> PixelRect {
        let normalized = raw.normalized();
        let step = i32::from(self.step);

        let first = self.snap_point(normalized.top_left());
        let mut second = self.snap_point(normalized.bottom_right());
        if step > 0 {
            second.x += step - 1;
            second.y += step - 1;
        }

        PixelRect::new(self.clamp_point(first), self.clamp_point(second))
    }

    /// Cells covered by a snapped rectangle; `None` if it covers no whole cell
    pub fn cell_rect(&self, rect: PixelRect) -> Option<CellRect> {
        let step = i32::from(self.step);
        if step == 0 {
            return None;
        }
        let rect = rect.normalized();
        let origin = self.cell_at(rect.top_left());
        let width = u16::try_from(rect.width() / step).ok()?;
        let height = u16::try_from(rect.height() / step).ok()?;
        let cells = CellRect::new(origin, width, height);
        (!cells.is_empty()).then_some(cells)
    }

    /// Cell under a pixel, clamped into the layer
    pub fn cell_at(&self, point: PixelPoint) -> Coord {
        let step = i32::from(self.step.max(1));
        let x = (point.x / step).min(i32::from(self.width) - 1).max(0);
        let y = (point.y / step).min(i32::from(self.height) - 1).max(0);
        Coord::new(x as u16, y as u16)
    }

    /// Pixel rectangle covering the whole layer
    pub fn full_rect(&self) -> PixelRect {
        PixelRect::new(
            PixelPoint::new(0, 0),
            PixelPoint::new(self.max_x().max(0), self.max_y().max(0)),
        )
    }

    /// Pixel rectangle covering `cells`
    pub fn pixel_rect(&self, cells: CellRect) -> PixelRect {
        let step = i32::from(self.step);
        let left = i32::from(cells.origin.x) * step;
        let top = i32::from(cells.origin.y) * step;
        PixelRect::new(
            PixelPoint::new(left, top),
            PixelPoint::new(
                left + i32::from(cells.width) * step - 1,
                top + i32::from(cells.height) * step - 1,
            ),
        )
    }
}
