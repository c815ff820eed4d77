pub mod geometry;
pub mod playback;
pub mod pointer;
pub mod renderer;
pub mod resize;
pub mod run_gate;
pub mod surface;

pub use geometry::{BoundingRect, ContainerSize, CoordinateMapper};
pub use playback::{PlaybackController, PlaybackSnapshot, TimerHost};
pub use pointer::{PointerTracker, Selection, SelectionMode};
pub use renderer::{Renderer, Scene};
pub use resize::ResizeCoalescer;
pub use run_gate::RunGate;
pub use surface::CanvasSurface;
