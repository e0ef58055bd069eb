//! Screen/canvas coordinate conversion, grid snapping and bounds clamping
//!
//! Every function here is pure: zoom, grid and canvas size are passed in by
//! the caller instead of being read from shared toolbar state.
//!
//! Canvas space is measured in page points with the origin at the top-left
//! corner of the page. Screen space is canvas space scaled by `zoom / 100`.

use serde::{Deserialize, Serialize};
use template::Size;

/// A position in canvas or screen space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale factor for a zoom percentage
pub fn zoom_factor(zoom: u32) -> f64 {
    zoom as f64 / 100.0
}

/// Constrain a zoom percentage to `min..=max`
pub fn clamp_zoom(zoom: u32, min: u32, max: u32) -> u32 {
    zoom.clamp(min, max)
}

/// Convert a screen-space point to canvas space
pub fn screen_to_canvas(point: Point, zoom: u32) -> Point {
    let factor = zoom_factor(zoom);
    Point::new(point.x / factor, point.y / factor)
}

/// Convert a canvas-space point to screen space
pub fn canvas_to_screen(point: Point, zoom: u32) -> Point {
    let factor = zoom_factor(zoom);
    Point::new(point.x * factor, point.y * factor)
}

/// Add a screen-space drag delta to a canvas-space position
pub fn apply_drag(position: Point, screen_dx: f64, screen_dy: f64, zoom: u32) -> Point {
    let factor = zoom_factor(zoom);
    Point::new(position.x + screen_dx / factor, position.y + screen_dy / factor)
}

/// Round a coordinate to the nearest grid multiple when snapping is enabled
pub fn snap(value: f64, grid_size: f64, enabled: bool) -> f64 {
    if !enabled || grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap both axes of a point
pub fn snap_point(point: Point, grid_size: f64, enabled: bool) -> Point {
    Point::new(
        snap(point.x, grid_size, enabled),
        snap(point.y, grid_size, enabled),
    )
}

/// Keep an element's nominal footprint inside the canvas
///
/// x ends up in `[0, canvas.width - footprint.width]` and y in
/// `[0, canvas.height - footprint.height]`. If the footprint is larger than
/// the canvas the upper bound collapses to 0.
pub fn clamp_to_bounds(position: Point, canvas: Size, footprint: Size) -> Point {
    let max_x = (canvas.width - footprint.width).max(0.0);
    let max_y = (canvas.height - footprint.height).max(0.0);
    Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Inputs for resolving a drag-end into a committed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragParams {
    pub zoom: u32,
    pub grid_size: f64,
    pub snap_enabled: bool,
    pub canvas: Size,
    pub footprint: Size,
}

/// Apply delta, then snap, then clamp
pub fn resolve_drag(position: Point, screen_dx: f64, screen_dy: f64, params: &DragParams) -> Point {
    let moved = apply_drag(position, screen_dx, screen_dy, params.zoom);
    let snapped = snap_point(moved, params.grid_size, params.snap_enabled);
    clamp_to_bounds(snapped, params.canvas, params.footprint)
}

/// Snap then clamp a position that did not come from a drag (e.g. a new element)
pub fn place(position: Point, params: &DragParams) -> Point {
    clamp_to_bounds(
        snap_point(position, params.grid_size, params.snap_enabled),
        params.canvas,
        params.footprint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A4: Size = Size {
        width: 595.0,
        height: 842.0,
    };
    const FOOTPRINT: Size = Size {
        width: 100.0,
        height: 20.0,
    };

    fn params(zoom: u32, snap_enabled: bool) -> DragParams {
        DragParams {
            zoom,
            grid_size: 20.0,
            snap_enabled,
            canvas: A4,
            footprint: FOOTPRINT,
        }
    }

    #[test]
    fn test_apply_drag_divides_by_zoom() {
        let moved = apply_drag(Point::new(100.0, 100.0), 50.0, -30.0, 200);
        assert_eq!(moved, Point::new(125.0, 85.0));

        let moved = apply_drag(Point::new(100.0, 100.0), 50.0, 50.0, 50);
        assert_eq!(moved, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap(29.0, 20.0, true), 20.0);
        assert_eq!(snap(31.0, 20.0, true), 40.0);
        assert_eq!(snap(31.0, 20.0, false), 31.0);
        assert_eq!(snap(-11.0, 20.0, true), -20.0);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let clamped = clamp_to_bounds(Point::new(-5.0, 900.0), A4, FOOTPRINT);
        assert_eq!(clamped, Point::new(0.0, 822.0));

        let clamped = clamp_to_bounds(Point::new(590.0, 10.0), A4, FOOTPRINT);
        assert_eq!(clamped, Point::new(495.0, 10.0));
    }

    #[test]
    fn test_clamp_footprint_larger_than_canvas() {
        let tiny = Size::new(50.0, 10.0);
        let clamped = clamp_to_bounds(Point::new(30.0, 30.0), tiny, FOOTPRINT);
        assert_eq!(clamped, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_resolve_drag_order() {
        // 480 + 30 = 510 snaps to 520, then clamps to 495
        let resolved = resolve_drag(Point::new(480.0, 100.0), 30.0, 0.0, &params(100, true));
        assert_eq!(resolved, Point::new(495.0, 100.0));

        let resolved = resolve_drag(Point::new(100.0, 100.0), 22.0, 9.0, &params(100, false));
        assert_eq!(resolved, Point::new(122.0, 109.0));
    }

    #[test]
    fn test_screen_canvas_conversion() {
        let screen = canvas_to_screen(Point::new(100.0, 50.0), 150);
        assert_eq!(screen, Point::new(150.0, 75.0));
        assert_eq!(screen_to_canvas(screen, 150), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(10, 50, 200), 50);
        assert_eq!(clamp_zoom(120, 50, 200), 120);
        assert_eq!(clamp_zoom(500, 50, 200), 200);
    }

    proptest! {
        #[test]
        fn prop_snap_idempotent(v in -10_000.0f64..10_000.0, grid in 1u32..100) {
            let grid = grid as f64;
            let once = snap(v, grid, true);
            prop_assert_eq!(snap(once, grid, true), once);
        }

        #[test]
        fn prop_drag_stays_in_bounds(
            x in 0.0f64..495.0,
            y in 0.0f64..822.0,
            dx in -5_000.0f64..5_000.0,
            dy in -5_000.0f64..5_000.0,
            zoom in 50u32..=200,
            snap_enabled in any::<bool>(),
        ) {
            let resolved = resolve_drag(Point::new(x, y), dx, dy, &params(zoom, snap_enabled));
            prop_assert!(resolved.x >= 0.0 && resolved.x <= A4.width - FOOTPRINT.width);
            prop_assert!(resolved.y >= 0.0 && resolved.y <= A4.height - FOOTPRINT.height);
        }
    }
}
