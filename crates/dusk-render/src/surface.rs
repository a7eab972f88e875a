//! Framebuffer viewport tracking.
//!
//! [`Viewport`] follows the window's physical size and stamps the full-frame
//! viewport onto each render pass. Zero-size windows (minimized, or Wayland
//! before the first configure) are clamped to 1×1 and flagged as not ready.

/// Minimum viewport dimension.
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

/// Full-framebuffer viewport in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    /// False while the window reports a zero dimension.
    ready: bool,
}

impl Viewport {
    pub fn new(physical_width: u32, physical_height: u32) -> Self {
        Self {
            width: physical_width.max(MIN_SURFACE_DIMENSION),
            height: physical_height.max(MIN_SURFACE_DIMENSION),
            ready: physical_width > 0 && physical_height > 0,
        }
    }

    /// Track a framebuffer resize. Returns the new size when it changed.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        self.ready = physical_width > 0 && physical_height > 0;
        let width = physical_width.max(MIN_SURFACE_DIMENSION);
        let height = physical_height.max(MIN_SURFACE_DIMENSION);

        if width == self.width && height == self.height {
            return None;
        }
        self.width = width;
        self.height = height;
        Some(PhysicalSize { width, height })
    }

    pub fn size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the last reported size was non-zero in both dimensions.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Cover the whole framebuffer with depth range `0..1`.
    pub fn apply(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_viewport(0.0, 0.0, self.width as f32, self.height as f32, 0.0, 1.0);
    }
}
