//! Responsive canvas sizing
//!
//! The arena keeps its aspect ratio and is scaled to fit the viewport below
//! the header and scoreboard. The backing store is scaled by the device
//! pixel ratio so sprites stay sharp.

/// Canvas border width in CSS pixels
pub const CANVAS_BORDER: f64 = 8.0;
/// Vertical breathing room around the canvas
pub const VERTICAL_PADDING: f64 = 24.0;
/// Smallest height budget before the border is subtracted
pub const MIN_HEIGHT: f64 = 200.0;
/// Share of the viewport width the canvas may use
pub const WIDTH_SHARE: f64 = 0.95;

/// Computed canvas geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// CSS display size
    pub css_width: u32,
    pub css_height: u32,
    /// Backing store size in device pixels
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Arena units → backing pixels
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Fit an arena into the viewport.
///
/// `chrome_height` is everything stacked above/below the canvas (header and
/// scoreboard).
pub fn fit_canvas(
    arena: (f32, f32),
    viewport: (f64, f64),
    chrome_height: f64,
    device_pixel_ratio: f64,
) -> CanvasLayout {
    let (arena_w, arena_h) = (f64::from(arena.0), f64::from(arena.1));
    let dpr = device_pixel_ratio.max(1.0);

    let max_w = viewport.0 * WIDTH_SHARE - CANVAS_BORDER;
    let max_h = (viewport.1 - chrome_height - VERTICAL_PADDING).max(MIN_HEIGHT) - CANVAS_BORDER;
    let scale = (max_w / arena_w).min(max_h / arena_h).max(0.0);

    let css_width = (arena_w * scale).floor() as u32;
    let css_height = (arena_h * scale).floor() as u32;
    let pixel_width = (f64::from(css_width) * dpr).floor() as u32;
    let pixel_height = (f64::from(css_height) * dpr).floor() as u32;

    CanvasLayout {
        css_width,
        css_height,
        pixel_width,
        pixel_height,
        scale_x: f64::from(pixel_width) / arena_w,
        scale_y: f64::from(pixel_height) / arena_h,
    }
}
