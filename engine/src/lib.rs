//! Small 2D runtime for grid games: an RGBA software renderer, a `winit`/`pixels` window
//! loop, and the clock/input seams that let game loops run headless.

pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod timer;
pub mod ui;

pub use timer::{Clock, InputSource, ManualClock, QueuedInput, SystemClock, TickTimer};
