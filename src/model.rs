//! Core data models for the maze visualizer.
//! Wire types mirror the remote service's JSON; `AppState` is the reducer-backed
//! snapshot every component reads from.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;
use yew::Reducible;

use crate::config::{DEFAULT_ANIMATION_SPEED_MS, MIN_SPEED_MS, Settings};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("grid row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze declared as {declared_width}x{declared_height} but its grid is {width}x{height}")]
    DimensionMismatch {
        declared_width: u32,
        declared_height: u32,
        width: u32,
        height: u32,
    },
}

/// Immutable wall/open matrix. `0` is open space, anything else is a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major cells; length = width * height.
    cells: Vec<u8>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Raw cell value, `None` out of bounds.
    pub fn cell(&self, p: Point) -> Option<u8> {
        if !self.contains(p) {
            return None;
        }
        self.cells.get((p.y * self.width + p.x) as usize).copied()
    }

    /// In bounds and open. Out-of-bounds points are never open.
    pub fn is_open(&self, p: Point) -> bool {
        self.cell(p) == Some(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(move |(i, _)| Point::new(i as u32 % width, i as u32 / width))
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    #[default]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::AStar => "A* Search",
        }
    }

    /// Wire name, also used as the `<option>` value.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateMazeRequest {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MazeResponse {
    pub width: u32,
    pub height: u32,
    pub grid: Grid,
    #[serde(default)]
    pub seed: Option<i64>,
}

impl MazeResponse {
    /// The declared `width`/`height` must agree with the grid itself.
    pub fn check_dimensions(&self) -> Result<(), GridError> {
        if self.width == self.grid.width() && self.height == self.grid.height() {
            return Ok(());
        }
        Err(GridError::DimensionMismatch {
            declared_width: self.width,
            declared_height: self.height,
            width: self.grid.width(),
            height: self.grid.height(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulateRequest<'a> {
    pub algorithm: Algorithm,
    pub grid: &'a Grid,
    pub start: Point,
    pub goal: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStats {
    pub expanded_nodes: u64,
    pub path_length: u64,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub found: bool,
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(default)]
    pub visited_order: Vec<Point>,
    pub stats: SimulationStats,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub maze: Option<Rc<Grid>>,
    pub seed: Option<i64>,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub algorithm: Algorithm,
    /// Expansion order of the latest run; replaced wholesale.
    pub visited_order: Rc<Vec<Point>>,
    pub path: Rc<Vec<Point>>,
    pub stats: Option<SimulationStats>,
    pub animation_speed_ms: u32,
    pub results: BTreeMap<Algorithm, SimulateResponse>,
    /// Bumped whenever `visited_order` is replaced, even by an identical sequence.
    pub run_id: u64,
    pub version: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            maze: None,
            seed: None,
            start: None,
            goal: None,
            algorithm: Algorithm::default(),
            visited_order: Rc::new(Vec::new()),
            path: Rc::new(Vec::new()),
            stats: None,
            animation_speed_ms: DEFAULT_ANIMATION_SPEED_MS,
            results: BTreeMap::new(),
            run_id: 0,
            version: 0,
        }
    }
}

impl AppState {
    fn clear_run(&mut self) {
        self.visited_order = Rc::new(Vec::new());
        self.path = Rc::new(Vec::new());
        self.stats = None;
        self.run_id += 1;
    }
}

#[derive(Clone, Debug)]
pub enum AppAction {
    SetMaze(MazeResponse),
    SetStart(Option<Point>),
    SetGoal(Option<Point>),
    SetAlgorithm(Algorithm),
    SetSimulationResult {
        algorithm: Algorithm,
        result: SimulateResponse,
    },
    SetAnimationSpeed(u32),
    ResetSimulation,
    ApplySettings(Settings),
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use AppAction::*;
        let mut new = (*self).clone();
        match action {
            SetMaze(maze) => {
                if let Err(e) = maze.check_dimensions() {
                    tracing::warn!(error = %e, "maze rejected");
                    return self;
                }
                new.maze = Some(Rc::new(maze.grid));
                new.seed = maze.seed;
                new.start = None;
                new.goal = None;
                new.results.clear();
                new.clear_run();
            }
            SetStart(p) => new.start = p,
            SetGoal(p) => new.goal = p,
            SetAlgorithm(a) => new.algorithm = a,
            SetSimulationResult { algorithm, result } => {
                new.visited_order = Rc::new(result.visited_order.clone());
                new.path = Rc::new(result.path.clone());
                new.stats = Some(result.stats);
                new.results.insert(algorithm, result);
                new.run_id += 1;
            }
            SetAnimationSpeed(ms) => new.animation_speed_ms = ms.max(MIN_SPEED_MS),
            ResetSimulation => new.clear_run(),
            ApplySettings(settings) => {
                new.animation_speed_ms = settings.animation_speed_ms.max(MIN_SPEED_MS);
                new.algorithm = settings.algorithm;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
