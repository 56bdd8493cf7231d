//! Grid layer storage for graphic and blocking layers

use crate::{Coord, TileAspect};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A value that can be stored in a grid layer cell
pub trait CellValue: Copy + PartialEq + Debug {
    /// The value written into cells that hold nothing
    fn empty() -> Self;
}

impl CellValue for TileAspect {
    fn empty() -> Self {
        TileAspect::UNDEFINED
    }
}

impl CellValue for bool {
    fn empty() -> Self {
        false
    }
}

/// A dense `width * height` grid of cells, addressed `y * width + x`
///
/// Out-of-range accesses never panic: reads return `None` and writes are ignored,
/// since region operations routinely run past the edge of a freshly resized layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridLayer<T>", bound(deserialize = "T: Deserialize<'de> + CellValue"))]
pub struct GridLayer<T: CellValue> {
    width: u16,
    height: u16,
    cells: Vec<T>,
}

/// Graphic layer: one tile aspect per cell
pub type GraphicLayer = GridLayer<TileAspect>;

/// Blocking layer: one collision flag per cell
pub type BlockingLayer = GridLayer<bool>;

impl<T: CellValue> GridLayer<T> {
    /// Create a layer with every cell set to the empty value
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, T::empty())
    }

    /// Create a layer with every cell set to `value`
    pub fn filled(width: u16, height: u16, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; usize::from(width) * usize::from(height)],
        }
    }

    /// Build a layer from row-major cells; `None` if the length doesn't match
    pub fn from_cells(width: u16, height: u16, cells: Vec<T>) -> Option<Self> {
        if cells.len() != usize::from(width) * usize::from(height) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord)
            .then(|| usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
    }

    /// Get the cell at `coord`, or `None` when it lies outside the layer
    pub fn get(&self, coord: Coord) -> Option<T> {
        self.index(coord).and_then(|i| self.cells.get(i).copied())
    }

    /// Overwrite the cell at `coord`; out-of-range coordinates are ignored
    pub fn set(&mut self, coord: Coord, value: T) {
        if let Some(cell) = self.index(coord).and_then(|i| self.cells.get_mut(i)) {
            *cell = value;
        }
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Resize the layer, keeping the overlapping region at the same coordinates
    ///
    /// New cells are empty; rows and columns past the new bounds are dropped.
    pub fn resize(&mut self, width: u16, height: u16) {
        let mut resized = Self::new(width, height);
        let keep_w = self.width.min(width);
        let keep_h = self.height.min(height);

        for y in 0..keep_h {
            for x in 0..keep_w {
                let coord = Coord::new(x, y);
                if let Some(value) = self.get(coord) {
                    resized.set(coord, value);
                }
            }
        }

        *self = resized;
    }

    /// Set every cell back to the empty value
    pub fn clear(&mut self) {
        self.cells.fill(T::empty());
    }
}

#[derive(Deserialize)]
struct RawGridLayer<T> {
    width: u16,
    height: u16,
    cells: Vec<T>,
}

impl<T: CellValue> TryFrom<RawGridLayer<T>> for GridLayer<T> {
    type Error = String;

    fn try_from(raw: RawGridLayer<T>) -> Result<Self, Self::Error> {
        let expected = usize::from(raw.width) * usize::from(raw.height);
        let found = raw.cells.len();
        GridLayer::from_cells(raw.width, raw.height, raw.cells).ok_or_else(|| {
            format!(
                "layer has {} cells, expected {} for {}x{}",
                found, expected, raw.width, raw.height
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graphic_layer() {
        let layer = GraphicLayer::new(10, 8);

        assert_eq!(layer.width(), 10);
        assert_eq!(layer.height(), 8);
        assert_eq!(layer.len(), 80);
        assert!(layer.cells().iter().all(|t| t.is_undefined()));
    }

    #[test]
    fn test_get_set() {
        let mut layer = BlockingLayer::new(4, 4);
        let coord = Coord::new(3, 2);

        assert_eq!(layer.get(coord), Some(false));
        layer.set(coord, true);
        assert_eq!(layer.get(coord), Some(true));
        // Row-major addressing
        assert!(layer.cells()[2 * 4 + 3]);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut layer = GraphicLayer::new(2, 2);
        let before = layer.clone();

        layer.set(Coord::new(2, 0), TileAspect::new(1, 0, 0));
        layer.set(Coord::new(0, 5), TileAspect::new(1, 0, 0));

        assert_eq!(layer, before);
        assert_eq!(layer.get(Coord::new(2, 0)), None);
        assert_eq!(layer.get(Coord::new(u16::MAX, u16::MAX)), None);
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut layer = GraphicLayer::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                layer.set(Coord::new(x, y), TileAspect::new(0, x as u8, y as u8));
            }
        }

        layer.resize(5, 2);

        assert_eq!(layer.len(), 10);
        for y in 0..2u16 {
            for x in 0..5u16 {
                let value = layer.get(Coord::new(x, y)).unwrap();
                if x < 3 {
                    assert_eq!(value, TileAspect::new(0, x as u8, y as u8));
                } else {
                    assert!(value.is_undefined());
                }
            }
        }
        assert_eq!(layer.get(Coord::new(0, 2)), None);
    }

    #[test]
    fn test_resize_blocking_down() {
        let mut layer = BlockingLayer::new(4, 4);
        layer.set(Coord::new(0, 0), true);
        layer.set(Coord::new(1, 1), true);
        layer.set(Coord::new(3, 3), true);

        layer.resize(2, 2);

        assert_eq!(layer.cells(), &[true, false, false, true]);
        assert_eq!(layer.get(Coord::new(3, 3)), None);

        // Growing back does not resurrect dropped cells
        layer.resize(4, 4);
        assert_eq!(layer.get(Coord::new(3, 3)), Some(false));
        assert_eq!(layer.get(Coord::new(1, 1)), Some(true));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(BlockingLayer::from_cells(2, 2, vec![false; 3]).is_none());
        assert!(BlockingLayer::from_cells(2, 2, vec![false; 4]).is_some());
    }

    #[test]
    fn test_deserialize_rejects_bad_length() {
        let json = r#"{"width":2,"height":2,"cells":[true,false]}"#;
        assert!(serde_json::from_str::<BlockingLayer>(json).is_err());

        let json = r#"{"width":1,"height":2,"cells":[true,false]}"#;
        let layer: BlockingLayer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.get(Coord::new(0, 0)), Some(true));
    }
}
