//! Pixel-space helpers for the live phase of a drag

use serde::{Deserialize, Serialize};

use crate::settings::GridGeometry;

/// A pointer translation in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Snap a raw translation to whole cells and keep the dragged block inside
/// the grid interior.
///
/// The interior is the container minus the period label column and the day
/// header row (plus the border allowance). When the block is larger than the
/// space left on an axis, the lower bound wins.
pub fn snap_translation(
    geometry: &GridGeometry,
    raw: Translation,
    dragged: Rect,
    container: Rect,
) -> Translation {
    let snapped_x = snap_axis(raw.x, geometry.cell_width);
    let snapped_y = snap_axis(raw.y, geometry.cell_height);

    let min_x = container.left - dragged.left + geometry.label_width + geometry.border_width;
    let min_y = container.top - dragged.top + geometry.header_height + geometry.border_width;
    let max_x = container.right - dragged.right;
    let max_y = container.bottom - dragged.bottom;

    Translation {
        x: snapped_x.max(min_x).min(max_x),
        y: snapped_y.max(min_y).min(max_y),
    }
}

fn snap_axis(raw: f64, cell: f64) -> f64 {
    if cell <= 0.0 {
        return raw;
    }
    (raw / cell).round() * cell
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5 days x 24 periods, label column 120px, header 40px
    fn container() -> Rect {
        Rect::from_origin_size(0.0, 0.0, 120.0 + 5.0 * 80.0, 40.0 + 24.0 * 30.0)
    }

    // A 2-period block on Tuesday, periods 3-4
    fn block() -> Rect {
        Rect::from_origin_size(121.0 + 80.0, 41.0 + 60.0, 80.0, 60.0)
    }

    #[test]
    fn test_snaps_to_nearest_cell() {
        let geometry = GridGeometry::default();
        let snapped = snap_translation(&geometry, Translation::new(50.0, 14.0), block(), container());
        assert_eq!(snapped, Translation::new(80.0, 0.0));

        let snapped = snap_translation(&geometry, Translation::new(-39.0, 46.0), block(), container());
        assert_eq!(snapped, Translation::new(0.0, 60.0));
    }

    #[test]
    fn test_clamps_to_interior() {
        let geometry = GridGeometry::default();

        // Far left / up: stops at the first day column and first period row
        let snapped = snap_translation(&geometry, Translation::new(-1000.0, -1000.0), block(), container());
        assert_eq!(snapped, Translation::new(-80.0, -60.0));

        // Far right / down: the block's far edge stops at the container edge
        let snapped = snap_translation(&geometry, Translation::new(1000.0, 1000.0), block(), container());
        let c = container();
        let b = block();
        assert_eq!(snapped, Translation::new(c.right - b.right, c.bottom - b.bottom));
    }

    #[test]
    fn test_far_edge_wins_when_block_overflows() {
        let geometry = GridGeometry::default();
        // Interior is narrower than the block, so the bounds cross
        let container = Rect::from_origin_size(0.0, 0.0, 200.0, 40.0 + 24.0 * 30.0);
        let wide = Rect::from_origin_size(121.0, 41.0, 100.0, 30.0);

        let snapped = snap_translation(&geometry, Translation::new(0.0, 0.0), wide, container);
        assert_eq!(snapped.x, container.right - wide.right);
    }
}
