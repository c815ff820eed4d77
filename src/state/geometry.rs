//! Container pixels <-> grid cells.
//!
//! Three coordinate spaces are involved:
//! - client space: what pointer events report, relative to the viewport;
//! - CSS space: offsets inside the container, `[0, container)` on each axis;
//! - backing space: canvas pixels, CSS space scaled by the device pixel ratio.
//!
//! Cell sizes are kept in CSS space; `cell_to_pixel_rect` converts to backing space.

use crate::model::{Grid, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_len(width),
            height: sanitize_len(height),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

/// `getBoundingClientRect()` of the drawable surface, in client space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle in backing-store pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows (positive) or shrinks (negative) each side independently.
    pub fn outset(&self, dx: f64, dy: f64) -> PixelRect {
        PixelRect {
            x: self.x - dx,
            y: self.y - dy,
            width: self.width + dx * 2.0,
            height: self.height + dy * 2.0,
        }
    }

    /// Interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub container: ContainerSize,
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell: CellSize,
    pub dpr: f64,
}

impl Geometry {
    pub fn new(container: ContainerSize, dpr: f64, grid_width: u32, grid_height: u32) -> Self {
        Self {
            container,
            grid_width,
            grid_height,
            cell: compute_geometry(container.width, container.height, grid_width, grid_height),
            dpr: sanitize_dpr(dpr),
        }
    }

    /// Canvas buffer size: `container * dpr`, rounded.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.container.width * self.dpr).round() as u32,
            (self.container.height * self.dpr).round() as u32,
        )
    }

    /// Cell extent in backing pixels.
    pub fn backing_cell(&self) -> CellSize {
        CellSize {
            width: self.cell.width * self.dpr,
            height: self.cell.height * self.dpr,
        }
    }

    pub fn is_drawable(&self) -> bool {
        let (bw, bh) = self.backing_size();
        bw > 0 && bh > 0 && self.cell.width > 0.0 && self.cell.height > 0.0
    }

    pub fn matches(&self, grid: &Grid) -> bool {
        self.grid_width == grid.width() && self.grid_height == grid.height()
    }
}

/// Plain division; cells may be sub-pixel on very large grids.
pub fn compute_geometry(container_width: f64, container_height: f64, grid_width: u32, grid_height: u32) -> CellSize {
    if grid_width == 0 || grid_height == 0 {
        return CellSize::default();
    }
    CellSize {
        width: container_width / grid_width as f64,
        height: container_height / grid_height as f64,
    }
}

pub fn pixel_to_cell(pointer_x: f64, pointer_y: f64, rect: &BoundingRect, geometry: &Geometry) -> Option<Point> {
    if !geometry.is_drawable() {
        return None;
    }
    let (backing_w, backing_h) = geometry.backing_size();
    let scale_x = backing_w as f64 / nonzero(rect.width);
    let scale_y = backing_h as f64 / nonzero(rect.height);
    let offset_x = (pointer_x - rect.left) * (scale_x / geometry.dpr);
    let offset_y = (pointer_y - rect.top) * (scale_y / geometry.dpr);
    if !(0.0..geometry.container.width).contains(&offset_x) || !(0.0..geometry.container.height).contains(&offset_y) {
        return None;
    }
    let x = (offset_x / geometry.cell.width).floor();
    let y = (offset_y / geometry.cell.height).floor();
    if x < 0.0 || y < 0.0 || x >= geometry.grid_width as f64 || y >= geometry.grid_height as f64 {
        return None;
    }
    Some(Point::new(x as u32, y as u32))
}

pub fn cell_to_pixel_rect(point: Point, geometry: &Geometry) -> PixelRect {
    let cell = geometry.backing_cell();
    PixelRect {
        x: point.x as f64 * cell.width,
        y: point.y as f64 * cell.height,
        width: cell.width,
        height: cell.height,
    }
}

/// Owns the cached geometry; every input change recomputes it.
#[derive(Debug)]
pub struct CoordinateMapper {
    container: ContainerSize,
    dpr: f64,
    grid_dims: (u32, u32),
    geometry: Geometry,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            container: ContainerSize::default(),
            dpr: 1.0,
            grid_dims: (0, 0),
            geometry: Geometry::new(ContainerSize::default(), 1.0, 0, 0),
        }
    }
}

impl CoordinateMapper {
    pub fn resize(&mut self, container: ContainerSize, dpr: f64) -> bool {
        self.container = container;
        self.dpr = sanitize_dpr(dpr);
        self.recompute()
    }

    pub fn set_grid(&mut self, width: u32, height: u32) -> bool {
        self.grid_dims = (width, height);
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let next = Geometry::new(self.container, self.dpr, self.grid_dims.0, self.grid_dims.1);
        if next == self.geometry {
            return false;
        }
        tracing::debug!(
            cell_w = next.cell.width,
            cell_h = next.cell.height,
            dpr = next.dpr,
            "geometry recomputed"
        );
        self.geometry = next;
        true
    }

    /// Geometry usable for `grid`: drawable and computed for its dimensions.
    pub fn geometry_for(&self, grid: &Grid) -> Option<Geometry> {
        (self.geometry.is_drawable() && self.geometry.matches(grid)).then_some(self.geometry)
    }

    /// Pointer -> in-bounds cell of `grid`, wall or open.
    pub fn pixel_to_cell(&self, grid: &Grid, pointer_x: f64, pointer_y: f64, rect: &BoundingRect) -> Option<Point> {
        let geometry = self.geometry_for(grid)?;
        pixel_to_cell(pointer_x, pointer_y, rect, &geometry).filter(|p| grid.contains(*p))
    }
}

fn sanitize_len(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

fn nonzero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(w: usize, h: usize) -> Grid {
        Grid::from_rows(vec![vec![0; w]; h]).unwrap()
    }

    fn rect_for(geometry: &Geometry) -> BoundingRect {
        BoundingRect {
            left: 0.0,
            top: 0.0,
            width: geometry.container.width,
            height: geometry.container.height,
        }
    }

    #[test]
    fn cell_size_is_plain_division() {
        let c = compute_geometry(800.0, 600.0, 10, 10);
        assert_eq!((c.width, c.height), (80.0, 60.0));
        let tiny = compute_geometry(100.0, 100.0, 1000, 1000);
        assert!(tiny.width > 0.0 && tiny.width < 1.0);
        assert_eq!(compute_geometry(100.0, 100.0, 0, 5), CellSize::default());
    }

    #[test]
    fn cell_centers_map_back_to_their_cell() {
        for dpr in [1.0, 1.5, 2.0, 3.0] {
            for (cw, ch, gw, gh) in [(800.0, 600.0, 10, 10), (333.0, 211.0, 31, 21), (90.0, 90.0, 9, 3)] {
                let g = Geometry::new(ContainerSize::new(cw, ch), dpr, gw, gh);
                let rect = rect_for(&g);
                let (bw, bh) = g.backing_size();
                for y in 0..gh {
                    for x in 0..gw {
                        let p = Point::new(x, y);
                        let (cx, cy) = cell_to_pixel_rect(p, &g).center();
                        // backing -> client, the exact inverse of the mapper's scale
                        let px = cx * rect.width / bw as f64;
                        let py = cy * rect.height / bh as f64;
                        assert_eq!(pixel_to_cell(px, py, &rect, &g), Some(p), "dpr={dpr} cell={p:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn css_size_mismatch_is_normalized() {
        // Canvas laid out at half its container size, e.g. mid-transition.
        let g = Geometry::new(ContainerSize::new(400.0, 400.0), 2.0, 4, 4);
        let rect = BoundingRect {
            left: 10.0,
            top: 20.0,
            width: 200.0,
            height: 200.0,
        };
        assert_eq!(pixel_to_cell(10.0 + 160.0, 20.0 + 40.0, &rect, &g), Some(Point::new(3, 0)));
    }

    #[test]
    fn outside_pointer_maps_to_none() {
        let g = Geometry::new(ContainerSize::new(100.0, 100.0), 1.0, 10, 10);
        let rect = rect_for(&g);
        assert_eq!(pixel_to_cell(-0.5, 5.0, &rect, &g), None);
        assert_eq!(pixel_to_cell(5.0, 100.0, &rect, &g), None);
        assert_eq!(pixel_to_cell(99.9, 99.9, &rect, &g), Some(Point::new(9, 9)));
    }

    #[test]
    fn overlap_ignores_shared_edges() {
        let a = PixelRect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
        let b = PixelRect { x: 1.0, y: 0.0, width: 1.0, height: 1.0 };
        assert!(!a.overlaps(&b));
        assert!(a.outset(0.1, 0.0).overlaps(&b));
    }

    #[test]
    fn zero_rect_is_treated_as_unit() {
        let g = Geometry::new(ContainerSize::new(10.0, 10.0), 1.0, 10, 10);
        let rect = BoundingRect::default();
        assert_eq!(pixel_to_cell(0.5, 0.5, &rect, &g), Some(Point::new(5, 5)));
    }

    #[test]
    fn stale_geometry_is_never_handed_out() {
        let mut mapper = CoordinateMapper::default();
        let grid = open_grid(10, 10);
        assert!(mapper.geometry_for(&grid).is_none());
        mapper.resize(ContainerSize::new(800.0, 600.0), 1.0);
        assert!(mapper.geometry_for(&grid).is_none(), "grid dims not set yet");
        assert!(mapper.set_grid(10, 10));
        let g = mapper.geometry_for(&grid).unwrap();
        assert_eq!((g.cell.width, g.cell.height), (80.0, 60.0));
        let other = open_grid(5, 5);
        assert!(mapper.geometry_for(&other).is_none());
    }

    #[test]
    fn repeated_resize_to_same_size_is_idempotent() {
        let mut mapper = CoordinateMapper::default();
        mapper.set_grid(10, 10);
        assert!(mapper.resize(ContainerSize::new(400.0, 300.0), 2.0));
        let grid = open_grid(10, 10);
        let before = mapper.geometry_for(&grid);
        assert!(!mapper.resize(ContainerSize::new(400.0, 300.0), 2.0));
        assert_eq!(mapper.geometry_for(&grid), before);
    }

    #[test]
    fn zero_container_is_not_drawable() {
        let mut mapper = CoordinateMapper::default();
        mapper.set_grid(10, 10);
        mapper.resize(ContainerSize::new(0.0, 300.0), 1.0);
        assert!(mapper.geometry_for(&open_grid(10, 10)).is_none());
        mapper.resize(ContainerSize::new(f64::NAN, 300.0), f64::NAN);
        assert!(mapper.geometry_for(&open_grid(10, 10)).is_none());
    }
}
