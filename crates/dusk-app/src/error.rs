//! Application error type and process exit codes.

use dusk_render::{RenderContextError, SurfaceError};

/// Process exit code for any fatal startup or runtime failure.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Fatal errors that end the app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to initialize GPU: {0}")]
    Render(#[from] RenderContextError),

    #[error("surface failure: {0}")]
    Surface(#[from] SurfaceError),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        FAILURE_EXIT_CODE
    }
}
