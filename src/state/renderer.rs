//! Layered maze painter.
//!
//! Paint order is fixed: base < visited < path < markers < hover. Each render
//! pass compares the incoming `Scene` with the last painted one, derives which
//! layers are dirty and repaints only those. Appending visited cells is the
//! only partial update; every other change repaints all layers.

use std::rc::Rc;

use super::geometry::{Geometry, PixelRect, cell_to_pixel_rect};
use super::surface::{Rgb, Surface};
use crate::model::{Grid, Point};

pub mod palette {
    use super::Rgb;

    pub const WALL: Rgb = Rgb::from_hex(0x0f172a);
    pub const SPACE: Rgb = Rgb::from_hex(0x1e293b);
    pub const VISITED: Rgb = Rgb::from_hex(0x38bdf8);
    pub const PATH: Rgb = Rgb::from_hex(0xfbbf24);
    pub const START: Rgb = Rgb::from_hex(0x22c55e);
    pub const GOAL: Rgb = Rgb::from_hex(0xef4444);
    pub const HOVER: Rgb = Rgb::from_hex(0xffffff);
}

const PATH_ALPHA: f64 = 0.9;
const PATH_INSET: f64 = 0.25;
const MARKER_RADIUS: f64 = 0.35;
const HOVER_OUTSET: f64 = 0.05;
const HOVER_OUTER_ALPHA: f64 = 0.2;
const HOVER_INSET: f64 = 0.1;
const HOVER_INNER_ALPHA: f64 = 0.1;

/// Recency gradient: later-expanded cells are more opaque.
pub fn visited_alpha(index: usize, total: usize) -> f64 {
    (0.15 + 0.65 * index as f64 / total.max(1) as f64).clamp(0.0, 0.85)
}

/// Everything one pass paints. Shared data is compared by `Rc` identity.
#[derive(Clone, Debug)]
pub struct Scene {
    pub grid: Option<Rc<Grid>>,
    pub visited_order: Rc<Vec<Point>>,
    pub visited_count: usize,
    pub path: Rc<Vec<Point>>,
    pub show_path: bool,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub hovered: Option<Point>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            grid: None,
            visited_order: Rc::new(Vec::new()),
            visited_count: 0,
            path: Rc::new(Vec::new()),
            show_path: false,
            start: None,
            goal: None,
            hovered: None,
        }
    }
}

impl Scene {
    /// Cells to reveal, bounded by the order's length.
    pub fn visited_target(&self) -> usize {
        self.visited_count.min(self.visited_order.len())
    }

    /// Hovered cell when it is an open cell of the current grid.
    fn active_hover(&self) -> Option<Point> {
        let grid = self.grid.as_deref()?;
        self.hovered.filter(|p| grid.is_open(*p))
    }
}

/// Outer glow and inner fill of the hover highlight, in backing pixels.
fn hover_rects(h: Point, geometry: &Geometry) -> (PixelRect, PixelRect) {
    let cell = geometry.backing_cell();
    let r = cell_to_pixel_rect(h, geometry);
    let outer = r.outset(
        (cell.width * HOVER_OUTSET).max(1.0),
        (cell.height * HOVER_OUTSET).max(1.0),
    );
    let inner = r.outset(
        -(cell.width * HOVER_INSET).max(1.0),
        -(cell.height * HOVER_INSET).max(1.0),
    );
    (outer, inner)
}

fn same_rc<T>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyLayers {
    pub base: bool,
    pub visited: bool,
    pub path: bool,
    pub markers: bool,
    pub hover: bool,
}

impl DirtyLayers {
    pub const ALL: DirtyLayers = DirtyLayers {
        base: true,
        visited: true,
        path: true,
        markers: true,
        hover: true,
    };

    pub const APPEND_VISITED: DirtyLayers = DirtyLayers {
        base: false,
        visited: true,
        path: false,
        markers: true,
        hover: false,
    };

    pub fn is_clean(&self) -> bool {
        *self == DirtyLayers::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPass {
    /// No grid; surface cleared.
    Idle,
    /// Geometry not usable yet; nothing painted.
    Deferred,
    Clean,
    Incremental { from: usize, to: usize },
    Full,
}

pub struct Renderer<S: Surface> {
    surface: S,
    scene: Scene,
    geometry: Option<Geometry>,
    /// Visited cells currently on the surface.
    painted: usize,
    /// Surface content no longer reflects `scene`; next pass must be full.
    stale: bool,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            scene: Scene::default(),
            geometry: None,
            painted: 0,
            stale: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &S {
        &self.surface
    }

    #[cfg(test)]
    pub(crate) fn painted(&self) -> usize {
        self.painted
    }

    /// Single render pass. `geometry` must come from the mapper for `scene.grid`.
    pub fn render(&mut self, scene: Scene, geometry: Option<Geometry>) -> RenderPass {
        let Some(grid) = scene.grid.clone() else {
            self.scene = scene;
            self.enter_idle();
            return RenderPass::Idle;
        };
        let geometry = match geometry {
            Some(g) if g.is_drawable() && g.matches(&grid) => g,
            _ => {
                tracing::trace!("render deferred until geometry is available");
                self.scene = scene;
                self.stale = true;
                return RenderPass::Deferred;
            }
        };
        let dirty = self.dirty_layers(&scene, &geometry);
        let from = self.painted;
        self.scene = scene;
        self.geometry = Some(geometry);
        if dirty.is_clean() {
            return RenderPass::Clean;
        }
        self.paint(dirty);
        if dirty.base {
            RenderPass::Full
        } else {
            RenderPass::Incremental { from, to: self.painted }
        }
    }

    fn dirty_layers(&self, next: &Scene, geometry: &Geometry) -> DirtyLayers {
        let prev = &self.scene;
        let invalidated = self.stale
            || self.geometry != Some(*geometry)
            || !same_rc(&prev.grid, &next.grid)
            || !Rc::ptr_eq(&prev.visited_order, &next.visited_order)
            || !Rc::ptr_eq(&prev.path, &next.path)
            || prev.show_path != next.show_path
            || prev.start != next.start
            || prev.goal != next.goal
            || prev.active_hover() != next.active_hover();
        if invalidated {
            return DirtyLayers::ALL;
        }
        let target = next.visited_target();
        if target < self.painted {
            return DirtyLayers::ALL;
        }
        if target == self.painted {
            return DirtyLayers::default();
        }
        if let Some(h) = next.active_hover() {
            if self.append_touches_hover(next, geometry, h, target) {
                return DirtyLayers::ALL;
            }
        }
        DirtyLayers::APPEND_VISITED
    }

    /// Whether appending `[painted, target)` or repainting markers would cover
    /// part of the hover highlight. The highlight's outset is at least one
    /// backing pixel, so on sub-pixel cells it spans several cells.
    fn append_touches_hover(&self, scene: &Scene, geometry: &Geometry, h: Point, target: usize) -> bool {
        // Antialiased edges share a pixel with their neighbour.
        let (outer, _) = hover_rects(h, geometry);
        let reach = outer.outset(1.0, 1.0);
        let touches = |p: &Point| cell_to_pixel_rect(*p, geometry).overlaps(&reach);
        scene.start.iter().chain(scene.goal.iter()).any(touches)
            || scene.visited_order[self.painted..target].iter().any(touches)
    }

    fn paint(&mut self, dirty: DirtyLayers) {
        if dirty.base {
            self.reset_and_draw_base();
        }
        if dirty.visited {
            let target = self.scene.visited_target();
            self.draw_visited_range(self.painted, target);
            self.painted = target;
        }
        if dirty.path {
            self.draw_path_overlay();
        }
        if dirty.markers {
            self.draw_markers();
        }
        if dirty.hover {
            self.draw_hover_effect();
        }
    }

    fn enter_idle(&mut self) {
        let (w, h) = self.surface.size();
        if w > 0 && h > 0 {
            self.surface.clear();
        }
        self.geometry = None;
        self.painted = 0;
        self.stale = true;
    }

    /// Full repaint of every layer from the stored scene.
    pub fn redraw_all(&mut self) {
        if self.scene.grid.is_none() || self.geometry.is_none() {
            return;
        }
        self.paint(DirtyLayers::ALL);
    }

    pub fn reset_and_draw_base(&mut self) {
        let (Some(grid), Some(geometry)) = (self.scene.grid.clone(), self.geometry) else {
            return;
        };
        let (bw, bh) = geometry.backing_size();
        self.surface.resize(bw, bh);
        self.surface.clear();
        self.painted = 0;
        self.stale = false;
        self.surface.fill_rect(
            PixelRect {
                x: 0.0,
                y: 0.0,
                width: bw as f64,
                height: bh as f64,
            },
            palette::WALL.opaque(),
        );
        let space = palette::SPACE.opaque();
        for p in grid.open_cells() {
            self.surface.fill_rect(cell_to_pixel_rect(p, &geometry), space);
        }
    }

    pub fn draw_visited_range(&mut self, from: usize, to: usize) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let order = Rc::clone(&self.scene.visited_order);
        let total = order.len();
        let to = to.min(total);
        for (i, p) in order.iter().enumerate().take(to).skip(from) {
            let color = palette::VISITED.with_alpha(visited_alpha(i, total));
            self.surface.fill_rect(cell_to_pixel_rect(*p, &geometry), color);
        }
    }

    pub fn draw_path_overlay(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        if !self.scene.show_path || self.scene.path.is_empty() {
            return;
        }
        let cell = geometry.backing_cell();
        let inset_x = (cell.width * PATH_INSET).max(1.0);
        let inset_y = (cell.height * PATH_INSET).max(1.0);
        let size_x = (cell.width - inset_x * 2.0).max(1.0);
        let size_y = (cell.height - inset_y * 2.0).max(1.0);
        let color = palette::PATH.with_alpha(PATH_ALPHA);
        let path = Rc::clone(&self.scene.path);
        for p in path.iter() {
            let r = cell_to_pixel_rect(*p, &geometry);
            self.surface.fill_rect(
                PixelRect {
                    x: r.x + inset_x,
                    y: r.y + inset_y,
                    width: size_x,
                    height: size_y,
                },
                color,
            );
        }
    }

    pub fn draw_markers(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let cell = geometry.backing_cell();
        let radius = cell.width.min(cell.height) * MARKER_RADIUS;
        for (p, color) in [(self.scene.start, palette::START), (self.scene.goal, palette::GOAL)] {
            if let Some(p) = p {
                let (cx, cy) = cell_to_pixel_rect(p, &geometry).center();
                self.surface.fill_circle(cx, cy, radius, color.opaque());
            }
        }
    }

    /// Transient highlight; always the last thing a pass paints.
    pub fn draw_hover_effect(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let Some(h) = self.scene.active_hover() else {
            return;
        };
        let (outer, inner) = hover_rects(h, &geometry);
        self.surface
            .fill_rect(outer, palette::HOVER.with_alpha(HOVER_OUTER_ALPHA));
        self.surface
            .fill_rect(inner, palette::HOVER.with_alpha(HOVER_INNER_ALPHA));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::geometry::ContainerSize;
    use crate::state::surface::PixelBuffer;

    /// 5x5, walls on the border, open interior.
    fn bordered(n: usize) -> Rc<Grid> {
        let rows = (0..n)
            .map(|y| (0..n).map(|x| u8::from(x == 0 || y == 0 || x == n - 1 || y == n - 1)).collect())
            .collect();
        Rc::new(Grid::from_rows(rows).unwrap())
    }

    fn pts(v: &[(u32, u32)]) -> Rc<Vec<Point>> {
        Rc::new(v.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    fn scenario_a() -> Scene {
        let order = pts(&[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3)]);
        Scene {
            grid: Some(bordered(5)),
            visited_order: order.clone(),
            visited_count: 0,
            path: order,
            show_path: false,
            start: Some(Point::new(1, 1)),
            goal: Some(Point::new(3, 3)),
            hovered: None,
        }
    }

    fn geometry(w: f64, h: f64, dpr: f64, grid: &Grid) -> Option<Geometry> {
        Some(Geometry::new(ContainerSize::new(w, h), dpr, grid.width(), grid.height()))
    }

    fn fresh(scene: &Scene, g: Option<Geometry>) -> PixelBuffer {
        let mut r = Renderer::new(PixelBuffer::default());
        assert_eq!(r.render(scene.clone(), g), RenderPass::Full);
        r.surface().clone()
    }

    #[test]
    fn alpha_rises_with_rank_and_caps() {
        assert_eq!(visited_alpha(0, 0), 0.15);
        assert!(visited_alpha(1, 10) > visited_alpha(0, 10));
        assert!(visited_alpha(9, 10) <= 0.85);
        assert_eq!(visited_alpha(1000, 10), 0.85);
    }

    #[test]
    fn base_paints_walls_and_open_cells() {
        let scene = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, scene.grid.as_ref().unwrap());
        let buf = fresh(&Scene { start: None, goal: None, ..scene }, g);
        assert_eq!(buf.size(), (50, 50));
        let w = palette::WALL;
        let s = palette::SPACE;
        assert_eq!(buf.pixel(5, 5), Some([w.r, w.g, w.b, 255]));
        assert_eq!(buf.pixel(25, 25), Some([s.r, s.g, s.b, 255]));
    }

    #[test]
    fn backing_store_is_scaled_by_dpr() {
        let scene = scenario_a();
        let g = geometry(50.0, 40.0, 2.0, scene.grid.as_ref().unwrap());
        assert_eq!(fresh(&scene, g).size(), (100, 80));
    }

    #[test]
    fn split_reveal_matches_single_pass() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.5, base.grid.as_ref().unwrap());
        let mut stepped = Renderer::new(PixelBuffer::default());
        stepped.render(base.clone(), g);
        assert_eq!(
            stepped.render(Scene { visited_count: 2, ..base.clone() }, g),
            RenderPass::Incremental { from: 0, to: 2 }
        );
        assert_eq!(
            stepped.render(Scene { visited_count: 5, ..base.clone() }, g),
            RenderPass::Incremental { from: 2, to: 5 }
        );
        let once = fresh(&Scene { visited_count: 5, ..base }, g);
        assert_eq!(stepped.surface(), &once);
    }

    #[test]
    fn every_split_point_matches() {
        let base = scenario_a();
        let g = geometry(35.0, 35.0, 1.0, base.grid.as_ref().unwrap());
        let once = fresh(&Scene { visited_count: 5, ..base.clone() }, g);
        for n in 0..=5 {
            let mut r = Renderer::new(PixelBuffer::default());
            r.render(Scene { visited_count: n, ..base.clone() }, g);
            r.render(Scene { visited_count: 5, ..base.clone() }, g);
            assert_eq!(r.surface().digest(), once.digest(), "split at {n}");
        }
    }

    #[test]
    fn reset_of_reveal_triggers_full_redraw() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(Scene { visited_count: 4, ..base.clone() }, g);
        assert_eq!(r.render(Scene { visited_count: 1, ..base.clone() }, g), RenderPass::Full);
        assert_eq!(r.painted(), 1);
        assert_eq!(r.surface(), &fresh(&Scene { visited_count: 1, ..base }, g));
    }

    #[test]
    fn unchanged_scene_is_clean() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        assert_eq!(r.render(base, g), RenderPass::Clean);
    }

    #[test]
    fn path_toggle_forces_full_redraw() {
        let base = Scene { visited_count: 5, ..scenario_a() };
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        let with_path = Scene { show_path: true, ..base };
        assert_eq!(r.render(with_path.clone(), g), RenderPass::Full);
        // Center of (2,1): the 0.9-alpha path color dominates the visited fill.
        let px = r.surface().pixel(25, 15).unwrap();
        assert_ne!(px, fresh(&Scene { show_path: false, ..with_path }, g).pixel(25, 15).unwrap());
        assert!(px[0] > 200 && px[1] > 150 && px[2] < 100);
    }

    #[test]
    fn path_is_hidden_unless_enabled() {
        let base = Scene { visited_count: 5, ..scenario_a() };
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let without = fresh(&base, g);
        let empty_path = fresh(&Scene { show_path: true, path: Rc::new(Vec::new()), ..base }, g);
        assert_eq!(without, empty_path);
    }

    #[test]
    fn markers_stay_on_top_of_new_visited_cells() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        r.render(Scene { visited_count: 5, ..base }, g);
        let s = palette::START;
        let gl = palette::GOAL;
        assert_eq!(r.surface().pixel(15, 15), Some([s.r, s.g, s.b, 255]));
        assert_eq!(r.surface().pixel(35, 35), Some([gl.r, gl.g, gl.b, 255]));
    }

    #[test]
    fn hover_only_on_open_cells() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let plain = fresh(&base, g);
        let on_wall = fresh(&Scene { hovered: Some(Point::new(0, 0)), ..base.clone() }, g);
        assert_eq!(plain, on_wall);
        let on_open = fresh(&Scene { hovered: Some(Point::new(2, 2)), ..base }, g);
        assert_ne!(plain, on_open);
    }

    #[test]
    fn hover_move_leaves_no_residue() {
        let base = scenario_a();
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(Scene { hovered: Some(Point::new(2, 2)), ..base.clone() }, g);
        assert_eq!(
            r.render(Scene { hovered: Some(Point::new(3, 2)), ..base.clone() }, g),
            RenderPass::Full
        );
        assert_eq!(r.surface(), &fresh(&Scene { hovered: Some(Point::new(3, 2)), ..base }, g));
    }

    #[test]
    fn reveal_near_hover_is_escalated_to_full() {
        let base = Scene { hovered: Some(Point::new(2, 2)), ..scenario_a() };
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        // (1,1) is diagonal to the hovered cell
        assert_eq!(r.render(Scene { visited_count: 1, ..base.clone() }, g), RenderPass::Full);
        assert_eq!(r.surface(), &fresh(&Scene { visited_count: 1, ..base }, g));
    }

    #[test]
    fn reveal_far_from_hover_stays_incremental() {
        let grid = bordered(9);
        let order = pts(&[(1, 1), (2, 1)]);
        let base = Scene {
            grid: Some(grid.clone()),
            visited_order: order,
            hovered: Some(Point::new(6, 6)),
            ..Scene::default()
        };
        let g = geometry(90.0, 90.0, 1.0, &grid);
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        assert_eq!(
            r.render(Scene { visited_count: 2, ..base.clone() }, g),
            RenderPass::Incremental { from: 0, to: 2 }
        );
        assert_eq!(r.surface(), &fresh(&Scene { visited_count: 2, ..base }, g));
    }

    #[test]
    fn resize_redraws_without_residue() {
        let grid = bordered(10);
        let scene = Scene {
            grid: Some(grid.clone()),
            visited_order: pts(&[(1, 1), (2, 1), (3, 1)]),
            visited_count: 3,
            start: Some(Point::new(1, 1)),
            goal: Some(Point::new(8, 8)),
            ..Scene::default()
        };
        let big = geometry(800.0, 600.0, 1.0, &grid);
        let small = geometry(400.0, 300.0, 1.0, &grid);
        let (b, s) = (big.unwrap(), small.unwrap());
        assert_eq!(s.cell.width * 2.0, b.cell.width);
        assert_eq!(s.cell.height * 2.0, b.cell.height);
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(scene.clone(), big);
        assert_eq!(r.render(scene.clone(), small), RenderPass::Full);
        assert_eq!(r.surface().size(), (400, 300));
        assert_eq!(r.surface().digest(), fresh(&scene, small).digest());
    }

    #[test]
    fn missing_grid_clears_and_idles() {
        let base = Scene { visited_count: 3, ..scenario_a() };
        let g = geometry(50.0, 50.0, 1.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        assert_eq!(r.render(Scene::default(), None), RenderPass::Idle);
        assert!((0..50).all(|x| r.surface().pixel(x, 10) == Some([0, 0, 0, 0])));
        assert_eq!(r.painted(), 0);
        // Coming back repaints everything.
        assert_eq!(r.render(base, g), RenderPass::Full);
    }

    #[test]
    fn zero_geometry_defers_painting() {
        let base = scenario_a();
        let grid = base.grid.clone().unwrap();
        let mut r = Renderer::new(PixelBuffer::default());
        assert_eq!(r.render(base.clone(), geometry(0.0, 0.0, 1.0, &grid)), RenderPass::Deferred);
        assert_eq!(r.surface().size(), (0, 0));
        assert_eq!(r.render(base, geometry(50.0, 50.0, 1.0, &grid)), RenderPass::Full);
    }

    #[test]
    fn geometry_for_another_grid_is_rejected() {
        let base = scenario_a();
        let other = bordered(7);
        let mut r = Renderer::new(PixelBuffer::default());
        assert_eq!(r.render(base, geometry(50.0, 50.0, 1.0, &other)), RenderPass::Deferred);
    }

    #[test]
    fn hover_on_sub_pixel_cells_is_never_overdrawn() {
        let grid = Rc::new(Grid::from_rows(vec![vec![0; 40]; 40]).unwrap());
        let base = Scene {
            grid: Some(grid.clone()),
            visited_order: pts(&[(18, 18), (2, 2)]),
            hovered: Some(Point::new(20, 20)),
            ..Scene::default()
        };
        // 0.25 px cells; the one-pixel hover outset spans four cells each way.
        let g = geometry(10.0, 10.0, 1.0, &grid);
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        assert_eq!(r.render(Scene { visited_count: 1, ..base.clone() }, g), RenderPass::Full);
        assert_eq!(r.surface(), &fresh(&Scene { visited_count: 1, ..base.clone() }, g));
        // (2,2) lies well outside the highlight.
        assert_eq!(
            r.render(Scene { visited_count: 2, ..base.clone() }, g),
            RenderPass::Incremental { from: 1, to: 2 }
        );
        assert_eq!(r.surface(), &fresh(&Scene { visited_count: 2, ..base }, g));
    }

    #[test]
    fn redraw_all_reproduces_the_same_frame() {
        crate::util::test_logging();
        let base = Scene {
            visited_count: 4,
            show_path: true,
            hovered: Some(Point::new(2, 2)),
            ..scenario_a()
        };
        let g = geometry(60.0, 45.0, 2.0, base.grid.as_ref().unwrap());
        let mut r = Renderer::new(PixelBuffer::default());
        r.render(base.clone(), g);
        let before = r.surface().clone();
        r.redraw_all();
        assert_eq!(r.surface(), &before);
        assert_eq!(r.painted(), 4);
    }
}
