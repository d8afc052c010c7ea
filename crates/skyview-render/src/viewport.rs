//! Window viewport tracking.
//!
//! Keeps physical and logical dimensions in sync with the window's scale
//! factor and clamps zero-size windows (minimized, or Wayland before the first
//! configure) to 1×1 so surface configuration never sees a zero extent.

/// Smallest surface extent the viewport ever reports.
pub const MIN_VIEWPORT_DIMENSION: u32 = 1;

/// Physical pixel dimensions of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Emitted when the physical size or scale factor changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportResize {
    pub physical: PhysicalSize,
    pub scale_factor: f64,
    /// True when the window reported a zero extent and was clamped.
    pub minimized: bool,
}

/// Current viewport state of the main window.
#[derive(Clone, Debug)]
pub struct Viewport {
    size: PhysicalSize,
    scale_factor: f64,
    minimized: bool,
}

impl Viewport {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            size: clamp_size(physical_width, physical_height),
            scale_factor,
            minimized: physical_width == 0 || physical_height == 0,
        }
    }

    /// Apply a window resize. Returns `None` when nothing changed.
    pub fn resize(&mut self, physical_width: u32, physical_height: u32) -> Option<ViewportResize> {
        let size = clamp_size(physical_width, physical_height);
        let minimized = physical_width == 0 || physical_height == 0;
        if size == self.size && minimized == self.minimized {
            return None;
        }
        self.size = size;
        self.minimized = minimized;
        Some(self.event())
    }

    /// Apply a scale factor change. Always produces an event, since the
    /// physical extent of the same logical window differs between displays.
    pub fn rescale(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> ViewportResize {
        self.scale_factor = scale_factor;
        self.size = clamp_size(physical_width, physical_height);
        self.minimized = physical_width == 0 || physical_height == 0;
        self.event()
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Logical (DPI-independent) width and height.
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.size.width as f64 / self.scale_factor,
            self.size.height as f64 / self.scale_factor,
        )
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.size.aspect_ratio()
    }

    /// Rendering is skipped while the window has no visible area.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn event(&self) -> ViewportResize {
        ViewportResize {
            physical: self.size,
            scale_factor: self.scale_factor,
            minimized: self.minimized,
        }
    }
}

fn clamp_size(width: u32, height: u32) -> PhysicalSize {
    PhysicalSize {
        width: width.max(MIN_VIEWPORT_DIMENSION),
        height: height.max(MIN_VIEWPORT_DIMENSION),
    }
}
