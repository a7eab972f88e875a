//! Dawn to Dusk application framework.
//!
//! Window creation, input, frame timing and the per-frame scene renderer.

pub mod clock;
pub mod error;
pub mod input;
pub mod renderer;
pub mod window;

pub use clock::{FrameClock, FrameStats};
pub use error::{AppError, FAILURE_EXIT_CODE};
pub use input::{EXIT_KEY, KeyboardState};
pub use renderer::{FrameUniforms, SceneRenderer, advance_frame};
pub use window::{AppState, initial_scene, run, window_attributes_from_config};
